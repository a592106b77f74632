use configurator::{config_builder_for, configuration, ConfigError, InterfaceDescription};
use tracing_subscriber::EnvFilter;

#[configuration]
pub struct Registration {
    username: String,
    email: String,
    terms_accepted: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Error Handling Example ===\n");

    // Successful registration
    println!("1. Successful registration:");
    match create_registration("alice") {
        Ok(reg) => println!("   Success: {:?}\n", reg),
        Err(e) => println!("   Error: {}\n", e),
    }

    // Missing fields
    println!("2. Missing email and terms:");
    match Registration::builder().and_then(|b| b.username("bob".to_string()).done()) {
        Ok(reg) => println!("   Success: {:?}\n", reg),
        Err(ConfigError::MissingProperty(names)) => {
            println!("   Missing: {}\n", names.join(", "))
        }
        Err(e) => println!("   Error: {}\n", e),
    }

    // Descriptions that disagree
    println!("3. Mismatched descriptions:");
    let reader = InterfaceDescription::interface("Registration")
        .accessor("username", "String")
        .accessor("email", "String");
    let builder = InterfaceDescription::interface("RegistrationBuilder")
        .setter("username", "String")
        .done("Registration");
    match config_builder_for(&reader, &builder) {
        Ok(_) => println!("   Unexpectedly valid\n"),
        Err(e) => println!("   Error: {}\n", e),
    }
}

fn create_registration(username: &str) -> Result<Registration, ConfigError> {
    Registration::builder()?
        .username(username.to_string())
        .email(format!("{username}@example.com"))
        .terms_accepted(true)
        .done()
}
