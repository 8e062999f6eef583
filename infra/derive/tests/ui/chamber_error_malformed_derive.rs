use chamber_derive::chamber_error;

#[chamber_error]
#[derive(Debug = 1)]
pub enum DemoError {
    #[error("Boom{}", format_context(.context))]
    Boom { context: Option<std::borrow::Cow<'static, str>> },
}

fn main() {}
