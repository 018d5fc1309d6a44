// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

// Heeler commands
#[derive(Debug, Clone, PartialEq)]
pub enum HeelerCommand {
    PrintFiles,
    PrintFunctions,
    Check,
    GenerateConfig,
}

pub struct HeelerArgs {
    pub command: HeelerCommand,
    pub config_path: Option<String>,
    pub project_root: Option<String>,
    pub extra_args: Vec<String>,
}

impl HeelerArgs {
    pub fn parse<I>(args: I) -> Self
    where
        I: Iterator<Item = String>,
    {
        let mut command = HeelerCommand::Check; // Default command
        let mut config_path = None;
        let mut project_root = None;

        // Convert args to a vector for easier processing
        let args: Vec<String> = args.collect();

        // Actual arguments start after the program name
        let mut start_idx = 1;

        // Check if there are any arguments left
        if args.len() > start_idx {
            // Check if the next arg is a command
            match args[start_idx].as_str() {
                "print-files" => {
                    command = HeelerCommand::PrintFiles;
                    start_idx += 1;
                }
                "print-functions" => {
                    command = HeelerCommand::PrintFunctions;
                    start_idx += 1;
                }
                "check" => {
                    command = HeelerCommand::Check;
                    start_idx += 1;
                }
                "generate-config" => {
                    command = HeelerCommand::GenerateConfig;
                    start_idx += 1;
                }
                _ => { /* Not a command, use default and keep this arg */ }
            }
        }

        // Look for --heeler-config and --project arguments
        let mut extra_args = Vec::new();
        let mut i = start_idx;
        while i < args.len() {
            if args[i] == "--heeler-config" {
                // Check if there's a value after --heeler-config
                if i + 1 < args.len() {
                    config_path = Some(args[i + 1].clone());
                    i += 2; // Skip both the flag and its value
                } else {
                    // Missing value for --heeler-config
                    eprintln!("Warning: --heeler-config flag requires a path argument");
                    i += 1;
                }
            } else if args[i] == "--project" {
                if i + 1 < args.len() {
                    project_root = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Warning: --project flag requires a directory argument");
                    i += 1;
                }
            } else {
                // Not a flag we know; collect it so the caller can warn
                extra_args.push(args[i].clone());
                i += 1;
            }
        }

        Self {
            command,
            config_path,
            project_root,
            extra_args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(args: &[&str]) -> HeelerArgs {
        let args = args.iter().map(|s| s.to_string());
        HeelerArgs::parse(args)
    }

    #[test]
    fn test_basic_command_parsing() {
        // Test default command
        let args = parse_args(&["heeler"]);
        assert_eq!(args.command, HeelerCommand::Check);
        assert!(args.extra_args.is_empty());

        // Test print-files command
        let args = parse_args(&["heeler", "print-files"]);
        assert_eq!(args.command, HeelerCommand::PrintFiles);
        assert!(args.extra_args.is_empty());

        // Test print-functions command
        let args = parse_args(&["heeler", "print-functions"]);
        assert_eq!(args.command, HeelerCommand::PrintFunctions);
        assert!(args.extra_args.is_empty());

        // Test check command
        let args = parse_args(&["heeler", "check"]);
        assert_eq!(args.command, HeelerCommand::Check);
        assert!(args.extra_args.is_empty());

        // Test generate-config command
        let args = parse_args(&["heeler", "generate-config"]);
        assert_eq!(args.command, HeelerCommand::GenerateConfig);
        assert!(args.extra_args.is_empty());
    }

    #[test]
    fn test_heeler_config_argument() {
        // Test with --heeler-config argument
        let args = parse_args(&["heeler", "check", "--heeler-config", "/tmp/heeler.ron"]);
        assert_eq!(args.command, HeelerCommand::Check);
        assert_eq!(args.config_path, Some("/tmp/heeler.ron".to_string()));
        assert!(args.extra_args.is_empty());

        // Flag order should not matter relative to other flags
        let args = parse_args(&[
            "heeler",
            "check",
            "--project",
            "./backend",
            "--heeler-config",
            "/tmp/heeler.ron",
        ]);
        assert_eq!(args.command, HeelerCommand::Check);
        assert_eq!(args.config_path, Some("/tmp/heeler.ron".to_string()));
        assert_eq!(args.project_root, Some("./backend".to_string()));
        assert!(args.extra_args.is_empty());
    }

    #[test]
    fn test_project_argument() {
        let args = parse_args(&["heeler", "print-files", "--project", "../api"]);
        assert_eq!(args.command, HeelerCommand::PrintFiles);
        assert_eq!(args.project_root, Some("../api".to_string()));
        assert!(args.config_path.is_none());
    }

    #[test]
    fn test_unknown_args() {
        // When invoked with unknown args, should use default command
        let args = parse_args(&["heeler", "--verbose"]);
        assert_eq!(args.command, HeelerCommand::Check); // Default command
        assert_eq!(args.extra_args, vec!["--verbose"]);

        // With unknown subcommand, should use default command and keep the arg
        let args = parse_args(&["heeler", "unknown-command", "--verbose"]);
        assert_eq!(args.command, HeelerCommand::Check); // Default command
        assert_eq!(args.extra_args, vec!["unknown-command", "--verbose"]);
    }

    #[test]
    fn test_missing_flag_values() {
        // A trailing --heeler-config without a value is tolerated with a warning
        let args = parse_args(&["heeler", "check", "--heeler-config"]);
        assert_eq!(args.command, HeelerCommand::Check);
        assert!(args.config_path.is_none());

        let args = parse_args(&["heeler", "check", "--project"]);
        assert!(args.project_root.is_none());
    }
}
