use configurator::{configuration, ConfigResult};
use tracing_subscriber::EnvFilter;

#[configuration]
pub struct Database {
    url: String,
    #[property(default = 10u32)]
    pool_size: u32,
    schema: Option<String>,
}

fn main() -> ConfigResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Basic Usage Example ===\n");

    let primary = Database::builder()?
        .url("postgres://localhost/app".to_string())
        .done()?;
    println!("Primary:  {}", primary);
    println!("Pool size defaults to {}", primary.pool_size());

    let replica = primary
        .clone_builder()
        .url("postgres://replica/app".to_string())
        .schema("reporting".to_string())
        .done()?;
    println!("Replica:  {}", replica);
    println!("Primary is unchanged: {}", primary.url());

    let copy = primary.clone_builder().done()?;
    println!("Round-tripped copy equals primary: {}", copy == primary);
    println!("Replica equals primary: {}\n", replica == primary);

    Ok(())
}
