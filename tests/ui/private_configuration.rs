mod settings {
    use configurator::configuration;

    #[configuration]
    struct Limits {
        max_connections: u32,
        #[property(default = 30u64)]
        timeout_secs: u64,
    }

    pub fn max_connections() -> u32 {
        let limits = Limits::builder()
            .and_then(|builder| builder.max_connections(64).done());
        match limits {
            Ok(limits) => *limits.max_connections(),
            Err(_) => 0,
        }
    }
}

fn main() {
    assert_eq!(settings::max_connections(), 64);
}
