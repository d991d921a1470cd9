use anyhow::Result;
use clap::Parser;
use petplugin_core::config::{PluginConfig, CONFIG_FILE};
use petplugin_core::permissions::PermissionsCache;
use petplugin_core::plugin::PetPlugin;
use petplugin_core::server::{ConsoleSender, PlayerSender, SimpleCommandMap};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Drive the pet plugin from a terminal, as a single player.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path of the plugin config
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Name of the simulated player
    #[arg(long, default_value = "Steve")]
    player: String,

    /// Treat the player as a server operator
    #[arg(long)]
    op: bool,

    /// Permission nodes granted to the player; prefix with `-` to deny
    #[arg(long = "permission", value_name = "NODE")]
    permissions: Vec<String>,
}

fn run(args: Args) -> Result<()> {
    let config = PluginConfig::load(&args.config)?;
    let mut command_map = SimpleCommandMap::new();
    let mut plugin = PetPlugin::enable(config, &mut command_map)?;

    let player = PlayerSender::new(
        args.player,
        args.op,
        PermissionsCache::from_nodes(&args.permissions),
    );
    info!(
        "Type commands like /pets list. `console <line>` runs as the console, `tab <line>` completes, `reload` reloads, `stop` exits."
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        match line {
            "" => continue,
            "stop" => break,
            "reload" => {
                if let Err(err) = plugin.reload(&mut command_map) {
                    error!("Reload failed: {:#}", err);
                }
            }
            _ => {
                if let Some(console_line) = line.strip_prefix("console ") {
                    if !command_map.dispatch(&ConsoleSender, console_line) {
                        writeln!(stdout, "Unknown command: {}", console_line)?;
                    }
                } else if let Some(partial) = line.strip_prefix("tab ") {
                    let suggestions = command_map.tab_complete(&player, partial);
                    writeln!(stdout, "{}", suggestions.join(" "))?;
                } else if !command_map.dispatch(&player, line) {
                    writeln!(stdout, "Usage: {}", line.split(' ').next().unwrap_or(line))?;
                }
            }
        }
        for message in player.take_messages() {
            writeln!(stdout, "{}", message.plain_text())?;
        }
    }
    Ok(())
}

fn main() {
    // Setup logging
    let logfile = tracing_appender::rolling::daily("./logs", "petplugin.log");
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var("PETPLUGIN_LOG")
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(logfile.and(std::io::stdout))
        .with_env_filter(env_filter)
        .init();

    if let Err(err) = run(Args::parse()) {
        error!("{:#}", err);
        std::process::exit(1);
    }
}
