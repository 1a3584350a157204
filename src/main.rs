use xcrt_openapi::cli;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let command_line_interface = cli::CommandLineInterface::load();
    command_line_interface.run()
}
