use chamber_derive::chamber_error;

#[chamber_error]
pub enum DemoError {
    Missing { site_id: u32, context: Option<String> },
}

fn main() {}
