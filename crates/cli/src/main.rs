use quantumstock_cli::{App, AppConfig, Command};

fn main() -> anyhow::Result<()> {
    quantumstock_observability::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let config = AppConfig::from_env()?;
    let mut app = App::start(config)?;

    let output = app.run(command)?;
    app.drain_events();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
