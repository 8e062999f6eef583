use chamber_derive::chamber_error;
use std::borrow::Cow;

#[chamber_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Site {site_id} is missing{}", format_context(.context))]
    Missing { site_id: u32, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), std::io::Error> {
    Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
}

#[test]
fn chamber_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/chamber_error_pass.rs");
    t.compile_fail("tests/ui/chamber_error_no_context.rs");
    t.compile_fail("tests/ui/chamber_error_bad_context_type.rs");
    t.compile_fail("tests/ui/chamber_error_tuple_variant.rs");
    t.compile_fail("tests/ui/chamber_error_malformed_derive.rs");
}

#[test]
fn question_mark_converts_sources() {
    fn run() -> Result<(), DemoError> {
        read()?;
        Ok(())
    }

    let err = run().unwrap_err();
    assert!(matches!(err, DemoError::Io { context: None, .. }));
    assert_eq!(err.to_string(), "IO error: gone");
}

#[test]
fn context_is_attached_to_source_results() {
    let err = read().context("Reading settings").unwrap_err();
    assert_eq!(err.to_string(), "IO error (Reading settings): gone");
}

#[test]
fn context_is_attached_to_own_results() {
    let res: Result<(), DemoError> = Err(DemoError::Missing { site_id: 3, context: None });
    let err = res.context("Resolving current domain").unwrap_err();
    assert_eq!(err.to_string(), "Site 3 is missing (Resolving current domain)");
}

#[test]
fn strings_become_internal_errors() {
    let err: DemoError = "boom".into();
    assert!(matches!(err, DemoError::Internal { .. }));

    let err: DemoError = format!("code {}", 7).into();
    assert_eq!(err.to_string(), "Internal error: code 7");
}
