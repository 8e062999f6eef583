use chamber_derive::chamber_error;

#[chamber_error]
pub enum DemoError {
    Io(std::io::Error),
}

fn main() {}
