use error_stack::Report;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Debug, Error)]
#[error("Invalid given data occurred")]
pub struct Wrapper;

pub trait IntoValidatorReport<T> {
    fn into_validator_report(self) -> error_stack::Result<T, Wrapper>;
}

impl<T> IntoValidatorReport<T> for Result<T, ValidationErrors> {
    fn into_validator_report(self) -> error_stack::Result<T, Wrapper> {
        self.map_err(|errors| {
            let mut report = Report::new(Wrapper);
            for line in flatten_errors(&errors) {
                report = report.attach_printable(line);
            }
            report
        })
    }
}

/// Renders every validation failure as a `path: message` line, with
/// nested structs joined by dots (e.g. `db.pool_size: range`).
pub fn flatten_errors(errors: &ValidationErrors) -> Vec<String> {
    fn read_errors(errors: &ValidationErrors, path: &mut Vec<String>, out: &mut Vec<String>) {
        let mut fields = errors.errors().iter().collect::<Vec<_>>();
        fields.sort_by_key(|(field, _)| *field);

        for (field, kind) in fields {
            path.push((*field).to_string());
            match kind {
                ValidationErrorsKind::Field(list) => {
                    let field_str = path.join(".");
                    for error in list {
                        let message = error
                            .message
                            .as_ref()
                            .map_or_else(|| error.code.to_string(), ToString::to_string);
                        out.push(format!("{field_str}: {message}"));
                    }
                }
                ValidationErrorsKind::Struct(inner) => read_errors(inner, path, out),
                ValidationErrorsKind::List(list) => {
                    for (index, inner) in list {
                        path.push(index.to_string());
                        read_errors(inner, path, out);
                        path.pop();
                    }
                }
            }
            path.pop();
        }
    }

    let mut out = Vec::new();
    read_errors(errors, &mut Vec::new(), &mut out);
    out
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Inner {
        #[validate(range(min = 1, message = "must be positive"))]
        size: u32,
    }

    #[derive(Validate)]
    struct Outer {
        #[validate(length(min = 1))]
        name: String,
        #[validate(nested)]
        inner: Inner,
    }

    #[test]
    fn test_flatten_errors() {
        let value = Outer {
            name: String::new(),
            inner: Inner { size: 0 },
        };

        let errors = value.validate().unwrap_err();
        assert_eq!(
            flatten_errors(&errors),
            vec!["inner.size: must be positive".to_string(), "name: length".to_string()]
        );
    }
}
