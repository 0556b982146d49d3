use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::process::{Command, Stdio};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for ufo-frontend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, build, test)
    Ci {
        #[arg(long)]
        verbose: bool,
    },
    /// Quick checks before commit (fmt, clippy)
    Check {
        #[arg(long)]
        verbose: bool,
    },
    /// Format code
    Fmt {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy {
        #[arg(long)]
        fix: bool,
    },
    /// Build the project
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        #[arg(long)]
        doc: bool,
        #[arg(long)]
        ignored: bool,
        /// Run only archive module tests
        #[arg(long)]
        archive: bool,
        /// Run only cursor module tests
        #[arg(long)]
        cursor: bool,
        /// Run only effects module tests
        #[arg(long)]
        effects: bool,
    },
    /// Run benchmarks
    Bench,
    /// Check a game data directory for the files the frontend reads
    Assets {
        /// Game data directory
        #[arg(default_value = "data")]
        path: String,
    },
    /// Pre-commit hook (fmt, clippy, test)
    PreCommit,
    /// Install git hooks
    InstallHooks,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { verbose } => run_ci(verbose),
        Commands::Check { verbose } => run_check(verbose),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy { fix } => run_clippy(fix),
        Commands::Build { release } => run_build(release),
        Commands::Test {
            doc,
            ignored,
            archive,
            cursor,
            effects,
        } => run_test(doc, ignored, archive, cursor, effects),
        Commands::Bench => run_bench(),
        Commands::Assets { path } => run_asset_check(&path),
        Commands::PreCommit => run_pre_commit(),
        Commands::InstallHooks => install_hooks(),
    }
}

fn run_ci(verbose: bool) -> Result<()> {
    println!("{}", "=== Running CI Pipeline ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", || run_clippy(false), verbose)?;
    run_task("Build", || run_build(false), verbose)?;
    run_task(
        "Test",
        || run_test(false, false, false, false, false),
        verbose,
    )?;

    let elapsed = start.elapsed();
    println!(
        "\n{} {}",
        "✓ CI passed in".green().bold(),
        format!("{:.2}s", elapsed.as_secs_f64()).bold()
    );

    Ok(())
}

fn run_check(verbose: bool) -> Result<()> {
    println!("{}", "=== Running Quick Checks ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", || run_clippy(false), verbose)?;

    let elapsed = start.elapsed();
    println!(
        "\n{} {}",
        "✓ Checks passed in".green().bold(),
        format!("{:.2}s", elapsed.as_secs_f64()).bold()
    );

    Ok(())
}

fn run_fmt(check: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("fmt").arg("--all");

    if check {
        cmd.arg("--").arg("--check");
    }

    execute_command(&mut cmd)
}

fn run_clippy(fix: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("clippy").arg("--workspace").arg("--all-targets");

    if fix {
        cmd.arg("--fix");
    } else {
        cmd.arg("--").arg("-D").arg("warnings");
    }

    execute_command(&mut cmd)
}

fn run_build(release: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("build");

    if release {
        cmd.arg("--release");
    }

    execute_command(&mut cmd)
}

fn run_test(doc: bool, ignored: bool, archive: bool, cursor: bool, effects: bool) -> Result<()> {
    if doc {
        let mut cmd = Command::new("cargo");
        cmd.arg("test").arg("--doc");
        if ignored {
            cmd.arg("--").arg("--ignored");
        }
        return execute_command(&mut cmd);
    }

    let modules = [
        (archive, "archive", "Archive"),
        (cursor, "cursor", "Cursor"),
        (effects, "effects", "Effects"),
    ];
    let selected: Vec<_> = modules.iter().filter(|(enabled, _, _)| *enabled).collect();

    if selected.is_empty() {
        let mut cmd = Command::new("cargo");
        cmd.arg("test").arg("--workspace");
        if ignored {
            cmd.arg("--").arg("--ignored");
        }
        return execute_command(&mut cmd);
    }

    let mut failed = Vec::new();
    for (_, module_path, module_name) in &selected {
        println!("{} Running {} tests...", "→".blue(), module_name.bold());

        let mut cmd = Command::new("cargo");
        cmd.arg("test").arg("--lib").arg(module_path);
        if ignored {
            cmd.arg("--").arg("--ignored");
        }

        match execute_command(&mut cmd) {
            Ok(_) => println!("{} {} tests passed\n", "✓".green(), module_name),
            Err(e) => {
                println!("{} {} tests failed\n", "✗".red(), module_name);
                if selected.len() == 1 {
                    return Err(e);
                }
                failed.push(*module_name);
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("Module tests failed: {}", failed.join(", "))
    }
}

fn run_bench() -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("bench");

    execute_command(&mut cmd)
}

/// Files the frontend reads, with the record size their length must be a multiple of
const EXPECTED_ASSETS: [(&str, u64); 2] = [
    ("UFOGRAPH/CURSOR.DAT", 24 * 24),
    ("GEODATA/PALETTES.DAT", 774),
];

fn run_asset_check(root: &str) -> Result<()> {
    use std::path::{Path, PathBuf};

    println!("{}", "=== Asset Check ===".bold().blue());

    let root = Path::new(root);
    if !root.is_dir() {
        println!(
            "{} Data directory not found: {}",
            "✗".red().bold(),
            root.display().to_string().yellow()
        );
        anyhow::bail!("Data directory not found");
    }

    // Game data is often copied from case-insensitive filesystems
    let find = |logical: &str| -> Option<PathBuf> {
        let mut current = root.to_path_buf();
        for component in logical.split('/') {
            let entry = std::fs::read_dir(&current).ok()?.flatten().find(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.eq_ignore_ascii_case(component))
            })?;
            current = entry.path();
        }
        Some(current)
    };

    let mut missing = 0;
    for (logical, record) in EXPECTED_ASSETS {
        match find(logical).and_then(|path| std::fs::metadata(&path).ok().map(|m| (path, m))) {
            Some((path, metadata)) => {
                let len = metadata.len();
                println!(
                    "{} {} ({} bytes, {} records)",
                    "✓".green(),
                    path.display().to_string().cyan(),
                    len,
                    len / record
                );
                if len % record != 0 {
                    println!(
                        "  {} {} trailing bytes will be ignored",
                        "⚠".yellow().bold(),
                        len % record
                    );
                }
            }
            None => {
                println!("{} {} missing", "✗".red().bold(), logical.yellow());
                missing += 1;
            }
        }
    }

    if missing > 0 {
        anyhow::bail!("{} asset(s) missing", missing);
    }

    println!("\n{}", "✓ All assets present".green().bold());
    Ok(())
}

fn run_pre_commit() -> Result<()> {
    println!("{}", "=== Pre-commit Checks ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), false)?;
    run_task("Clippy", || run_clippy(false), false)?;
    run_task(
        "Test",
        || run_test(false, false, false, false, false),
        false,
    )?;

    let elapsed = start.elapsed();
    println!(
        "\n{} {}",
        "✓ Pre-commit checks passed in".green().bold(),
        format!("{:.2}s", elapsed.as_secs_f64()).bold()
    );

    Ok(())
}

fn install_hooks() -> Result<()> {
    use std::fs;

    println!("{}", "Installing git hooks...".bold());

    let hook_content = r#"#!/bin/sh
# Auto-generated by cargo x install-hooks
set -e

echo "Running pre-commit checks..."
cargo x pre-commit
"#;

    let hook_path = ".git/hooks/pre-commit";
    fs::write(hook_path, hook_content)?;

    // Make executable (Unix only)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = fs::metadata(hook_path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(hook_path, perms)?;
    }

    println!("{}", "✓ Git hooks installed".green());
    println!("  Pre-commit hook will run: fmt, clippy, test");

    Ok(())
}

fn run_task<F>(name: &str, task: F, verbose: bool) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    print!("{} {} ... ", "→".blue(), name);

    let start = Instant::now();

    match task() {
        Ok(_) => {
            let elapsed = start.elapsed();
            println!(
                "{} {}",
                "✓".green().bold(),
                if verbose {
                    format!("({:.2}s)", elapsed.as_secs_f64())
                } else {
                    String::new()
                }
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", "✗".red().bold());
            Err(e)
        }
    }
}

fn execute_command(cmd: &mut Command) -> Result<()> {
    let status = cmd
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        anyhow::bail!("Command failed with exit code: {}", status);
    }

    Ok(())
}
