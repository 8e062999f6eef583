use chamber_derive::chamber_error;

#[chamber_error]
pub enum DemoError {
    Io { source: std::io::Error },
}

fn main() {}
