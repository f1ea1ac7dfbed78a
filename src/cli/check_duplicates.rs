use emoboard::config::Server as Config;
use emoboard::store::file::{find_duplicate_ids, FileStore, POSTS_FILE};
use error_stack::{Report, Result, ResultExt};

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

/// Report post ids that occur more than once in `posts.json`
#[derive(Debug, Parser)]
pub struct CheckDuplicatesCommand {
    /// Directory holding `posts.json`. Defaults to `storage.data_dir`.
    #[clap(long)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Error)]
#[error("Could not check posts for duplicate ids")]
pub struct CheckDuplicatesError;

pub fn run(args: CheckDuplicatesCommand) -> Result<(), CheckDuplicatesError> {
    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => {
            Config::load()
                .change_context(CheckDuplicatesError)?
                .storage
                .data_dir
        }
    };

    let store = FileStore::new(&data_dir);
    if !store.posts_path().exists() {
        return Err(Report::new(CheckDuplicatesError).attach_printable(format!(
            "{POSTS_FILE} does not exist in {}",
            data_dir.display()
        )));
    }

    let posts = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .change_context(CheckDuplicatesError)
        .attach_printable("could not build tokio runtime")?
        .block_on(store.read_posts())
        .change_context(CheckDuplicatesError)?;

    print!("{}", render(&find_duplicate_ids(&posts)));
    Ok(())
}

fn render(duplicates: &[(String, usize)]) -> String {
    if duplicates.is_empty() {
        return "No duplicates found.\n".into();
    }

    let mut out = String::from("DUPLICATES FOUND!\n");
    for (id, count) in duplicates {
        out.push_str(&format!("ID: {id}, Count: {count}\n"));
    }
    out
}
