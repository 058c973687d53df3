use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// HTTP front end of the POI proxy service registry.
#[derive(Parser, Debug)]
#[command(name = "poiproxy-server")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (TOML). Missing files are ignored.
    #[arg(short, long, global = true, default_value = "poiproxy.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands. `serve` runs when none is given.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan the descriptor store and serve it over HTTP.
    Serve {
        /// Port to listen on (overrides the configuration).
        #[arg(short, long)]
        port: Option<u16>,

        /// Descriptor store directory (overrides the configuration).
        #[arg(long)]
        services_dir: Option<PathBuf>,
    },
    /// List files under a directory whose path matches a pattern.
    Resources {
        /// Directory to walk.
        root: PathBuf,

        /// Regular expression that must match the whole canonical file path.
        #[arg(short, long)]
        pattern: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults() {
        let cli = Cli::parse_from(["poiproxy-server"]);
        assert_eq!(cli.config, PathBuf::from("poiproxy.toml"));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::parse_from([
            "poiproxy-server",
            "serve",
            "--port",
            "9000",
            "--services-dir",
            "/srv/services",
        ]);
        match cli.command {
            Some(Commands::Serve { port, services_dir }) => {
                assert_eq!(port, Some(9000));
                assert_eq!(services_dir, Some(PathBuf::from("/srv/services")));
            }
            other => panic!("Expected serve, got {:?}", other),
        }
    }

    #[test]
    fn test_resources_with_global_config_after_subcommand() {
        let cli = Cli::parse_from([
            "poiproxy-server",
            "resources",
            "./services",
            "-p",
            r"\.json$",
            "--config",
            "other.toml",
        ]);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        match cli.command {
            Some(Commands::Resources { root, pattern }) => {
                assert_eq!(root, PathBuf::from("./services"));
                assert_eq!(pattern.as_deref(), Some(r"\.json$"));
            }
            other => panic!("Expected resources, got {:?}", other),
        }
    }
}
