//! CLI for WebHDFS filesystem operations

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use webhdfs::common::{format_bytes, format_mode, format_timestamp, join_path};
use webhdfs::{Configuration, FileStatus, FileSystem, FsShell, Permission};

#[derive(Parser)]
#[command(name = "webhdfs")]
#[command(about = "WebHDFS filesystem client")]
#[command(version)]
struct Cli {
    /// Namenode addresses, `host:port` separated by `;`
    #[arg(long)]
    namenodes: Option<String>,

    /// Acting user (defaults to the local user)
    #[arg(long)]
    user: Option<String>,

    /// Prefix prepended to every remote path
    #[arg(long)]
    base_path: Option<String>,

    /// Use https
    #[arg(long)]
    https: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a directory
    Ls {
        #[arg(default_value = ".")]
        path: String,
    },

    /// Show the status of a file or directory
    Stat { path: String },

    /// Create a directory and any missing parents
    Mkdir {
        path: String,

        /// Octal permission
        #[arg(long, default_value = "755")]
        mode: String,
    },

    /// Upload a local file into a remote directory
    Put {
        local: PathBuf,

        #[arg(default_value = ".")]
        remote_dir: String,

        /// Replace an existing file
        #[arg(long)]
        overwrite: bool,
    },

    /// Download a remote file
    Get {
        remote: String,
        local: PathBuf,

        /// Delete the remote file after downloading
        #[arg(long)]
        remove: bool,
    },

    /// Print remote files to stdout
    Cat {
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Append local files to a remote file
    Append {
        remote: String,

        #[arg(required = true)]
        locals: Vec<PathBuf>,
    },

    /// Delete a file or directory
    Rm {
        path: String,

        #[arg(short, long)]
        recursive: bool,
    },

    /// Rename a file or directory
    Mv { source: String, destination: String },

    /// Change permissions
    Chmod {
        /// Octal permission
        mode: String,

        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Change owner, `OWNER` or `OWNER:GROUP` (`:GROUP` changes only the group)
    Chown {
        owner: String,

        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Show space usage
    Du { path: String },

    /// Show the file checksum
    Checksum { path: String },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Configuration::load().context("loading configuration")?;
    if let Some(namenodes) = cli.namenodes {
        config.addr = namenodes;
    }
    if let Some(user) = cli.user {
        config.user = user;
    }
    if let Some(base_path) = cli.base_path {
        config.base_path = base_path;
    }
    if cli.https {
        config.use_https = true;
    }

    let fs = FileSystem::new(config)?;
    let home = format!("/user/{}", fs.user());
    let mut shell = FsShell::new(fs, home);

    match cli.command {
        Commands::Ls { path } => {
            let path = shell.resolve(&path);
            let entries = shell.filesystem().list_status(&path)?;
            for status in &entries {
                println!("{}", listing_line(&path, status));
            }
        }

        Commands::Stat { path } => {
            let path = shell.resolve(&path);
            let status = shell.filesystem().get_file_status(&path)?;
            println!("Path: {}", path);
            println!("  Type: {}", status.file_type);
            println!("  Permission: {}", format_mode(&status.permission, status.is_dir()));
            println!("  Owner: {}:{}", status.owner, status.group);
            println!("  Length: {}", format_bytes(status.length));
            println!("  Replication: {}", status.replication);
            println!("  Block size: {}", format_bytes(status.block_size));
            println!("  Modified: {}", format_timestamp(status.modification_time));
            println!("  Accessed: {}", format_timestamp(status.access_time));
            if let Some(target) = &status.symlink {
                println!("  Symlink: {}", target);
            }
        }

        Commands::Mkdir { path, mode } => {
            let path = shell.resolve(&path);
            let permission = Permission::parse(&mode)?;
            if !shell.filesystem().mkdirs(&path, permission)? {
                anyhow::bail!("mkdir {} failed", path);
            }
        }

        Commands::Put {
            local,
            remote_dir,
            overwrite,
        } => {
            let remote = shell.put(&local, &remote_dir, overwrite)?;
            println!("{}", remote);
        }

        Commands::Get {
            remote,
            local,
            remove,
        } => {
            let size = if remove {
                shell.move_to_local(&remote, &local)?
            } else {
                shell.get(&remote, &local)?
            };
            println!("{} -> {} ({})", remote, local.display(), format_bytes(size));
        }

        Commands::Cat { paths } => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            shell.cat(&paths, &mut out)?;
        }

        Commands::Append { remote, locals } => {
            shell.append_to_file(&locals, &remote)?;
        }

        Commands::Rm { path, recursive } => {
            let path = shell.resolve(&path);
            if !shell.filesystem().delete(&path, recursive)? {
                anyhow::bail!("rm {}: nothing deleted", path);
            }
        }

        Commands::Mv {
            source,
            destination,
        } => {
            let source = shell.resolve(&source);
            let destination = shell.resolve(&destination);
            if !shell.filesystem().rename(&source, &destination)? {
                anyhow::bail!("mv {} {} failed", source, destination);
            }
        }

        Commands::Chmod { mode, paths } => {
            let permission = Permission::parse(&mode)?;
            shell.chmod(&paths, permission)?;
        }

        Commands::Chown { owner, paths } => match owner.split_once(':') {
            Some(("", group)) => shell.chgrp(&paths, group)?,
            Some((owner, group)) => {
                for path in &paths {
                    let path = shell.resolve(path);
                    shell.filesystem().set_owner(&path, owner, group)?;
                }
            }
            None => shell.chown(&paths, &owner)?,
        },

        Commands::Du { path } => {
            let path = shell.resolve(&path);
            let summary = shell.filesystem().get_content_summary(&path)?;
            println!("Content summary of {}:", path);
            println!("  Directories: {}", summary.directory_count);
            println!("  Files: {}", summary.file_count);
            println!("  Length: {}", format_bytes(summary.length));
            println!("  Space consumed: {}", format_bytes(summary.space_consumed));
            println!("  Quota: {}", quota(summary.quota));
            println!("  Space quota: {}", quota(summary.space_quota));
        }

        Commands::Checksum { path } => {
            let path = shell.resolve(&path);
            let checksum = shell.filesystem().get_file_checksum(&path)?;
            println!("{}\t{}\t{}", path, checksum.algorithm, checksum.bytes);
        }
    }

    Ok(())
}

fn listing_line(dir: &str, status: &FileStatus) -> String {
    let replication = if status.is_dir() {
        "-".to_string()
    } else {
        status.replication.to_string()
    };
    let name = if status.path_suffix.is_empty() {
        dir.to_string()
    } else {
        join_path(dir, &status.path_suffix)
    };
    format!(
        "{} {:>3} {:<10} {:<10} {:>12} {} {}",
        format_mode(&status.permission, status.is_dir()),
        replication,
        status.owner,
        status.group,
        status.length,
        format_timestamp(status.modification_time),
        name
    )
}

fn quota(value: i64) -> String {
    if value < 0 {
        "none".to_string()
    } else {
        value.to_string()
    }
}
