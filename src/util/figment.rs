use error_stack::{Context, Report};

/// Describes one figment error on a single line:
/// `<key>: <kind> (in <source>)`, leaving out whatever figment
/// could not tell.
fn describe(error: &figment::Error) -> String {
    let mut line = String::new();
    if let (Some(profile), Some(md)) = (&error.profile, &error.metadata) {
        if !error.path.is_empty() {
            line.push_str(&md.interpolate(profile, &error.path));
            line.push_str(": ");
        }
    }
    line.push_str(&error.kind.to_string());

    if let Some(md) = &error.metadata {
        match &md.source {
            Some(source) => line.push_str(&format!(" (in {} {source})", md.name)),
            None => line.push_str(&format!(" (in {})", md.name)),
        }
    }
    line
}

pub trait FigmentErrorAttachable<T: Context> {
    /// Attaches every error figment collected while extracting the
    /// configuration, one line each.
    #[must_use]
    fn attach_figment_error(self, err: figment::Error) -> Report<T>;
}

impl<T: Context> FigmentErrorAttachable<T> for Report<T> {
    fn attach_figment_error(self, e: figment::Error) -> Report<T> {
        e.into_iter()
            .fold(self, |report, error| report.attach_printable(describe(&error)))
    }
}
