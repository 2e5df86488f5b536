use anyhow::{Context, anyhow, bail};
use std::path::{Path, PathBuf};
use std::process::Command;

static EXPECTED_STDOUT_FILE: &str = "expected-stdout";
static EXPECTED_REPORT_FILE: &str = "expected-report.json";
static ACTUAL_REPORT_FILE: &str = "actual-report.json";

struct TestCase {
    dir: PathBuf,
    name: String,
    args: String,
    expected_stdout: Option<String>,
    expected_report: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let mut test_cases = Vec::new();
    let test_dirs =
        std::fs::read_dir("golden-tests/tests").context("golden tests root directory not found")?;
    for entry in test_dirs {
        let path = entry?.path();
        if !path.is_dir() {
            println!(
                "skipping path `{}` because it's not a directory",
                path.display()
            );
            continue;
        }

        let args_path = path.join("args");
        let args = std::fs::read_to_string(&args_path)
            .with_context(|| format!("no `args` file found at `{}`", args_path.display()))?;

        test_cases.push(TestCase {
            name: path.display().to_string(),
            expected_stdout: read_expected(&path, EXPECTED_STDOUT_FILE)?,
            expected_report: read_expected(&path, EXPECTED_REPORT_FILE)?,
            dir: path,
            args,
        })
    }
    test_cases.sort_by(|a, b| a.name.cmp(&b.name));

    let mut errored = false;
    for test_case in test_cases {
        let name = test_case.name.clone();
        match run_simulate(test_case) {
            Ok(()) => println!("{name}: ✅"),
            Err(TestError::Internal(e)) => {
                println!("Error running golden test `{name}`\n{e:?}");
                errored = true;
            }
            Err(TestError::Compare(diffs)) => {
                println!("Golden test `{name}` produced unexpected output");
                for (file, diff) in diffs {
                    println!("Expected `{file}` differs from actual output:\n{diff}\n");
                }
                errored = true;
            }
        }
    }

    if errored {
        bail!("one or more golden tests failed");
    }

    Ok(())
}

/// Reads an expectation file, if it was already recorded
fn read_expected(dir: &Path, file: &str) -> anyhow::Result<Option<String>> {
    let path = dir.join(file);
    if !path.is_file() {
        return Ok(None);
    }

    std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read `{}`", path.display()))
        .map(Some)
}

fn remove_if_exists(path: &Path) -> anyhow::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
            Err::<(), _>(e).with_context(|| format!("failed to remove `{}`", path.display()))
        }
        _ => Ok(()),
    }
}

enum TestError {
    Internal(anyhow::Error),
    /// Pairs of expectation file name and diff
    Compare(Vec<(&'static str, String)>),
}

fn run_simulate(test_case: TestCase) -> Result<(), TestError> {
    // Each case gets its own report path, cleared beforehand so a failed run cannot leave a stale
    // report behind
    let report_path = test_case.dir.join(ACTUAL_REPORT_FILE);
    remove_if_exists(&report_path).map_err(TestError::Internal)?;

    let simulate_args = test_case.args.split_whitespace();
    let command = Command::new("cargo")
        .arg("run")
        .arg("--release")
        .arg("--bin")
        .arg("simulate")
        .arg("--")
        .arg("--report")
        .arg(&report_path)
        .args(simulate_args)
        .output()
        .context("simulate process crashed")
        .map_err(TestError::Internal)?;

    if !command.status.success() {
        remove_if_exists(&report_path).map_err(TestError::Internal)?;
        return Err(TestError::Internal(anyhow!(
            "simulate exited with {}:\n{}",
            command.status,
            String::from_utf8_lossy(&command.stderr)
        )));
    }

    let stdout = String::from_utf8_lossy(&command.stdout);
    let report = std::fs::read_to_string(&report_path)
        .with_context(|| format!("failed to read `{}`", report_path.display()));
    remove_if_exists(&report_path).map_err(TestError::Internal)?;
    let report = report.map_err(TestError::Internal)?;

    let outputs = [
        (EXPECTED_STDOUT_FILE, test_case.expected_stdout, &*stdout),
        (EXPECTED_REPORT_FILE, test_case.expected_report, report.as_str()),
    ];

    let mut diffs = Vec::new();
    for (file, expected, actual) in outputs {
        match expected {
            Some(expected) if expected != actual => {
                diffs.push((file, diff::diff_to_string(&expected, actual)));
            }
            Some(_) => {}
            // First run, record the output as the expectation
            None => std::fs::write(test_case.dir.join(file), actual)
                .with_context(|| format!("failed to persist `{file}`"))
                .map_err(TestError::Internal)?,
        }
    }

    if diffs.is_empty() {
        Ok(())
    } else {
        Err(TestError::Compare(diffs))
    }
}

mod diff {
    use console::{Style, style};
    use similar::{ChangeTag, TextDiff};
    use std::fmt::{self, Write};

    struct Line(Option<usize>);

    impl fmt::Display for Line {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self.0 {
                None => write!(f, "    "),
                Some(idx) => write!(f, "{:<4}", idx + 1),
            }
        }
    }

    pub fn diff_to_string(old: &str, new: &str) -> String {
        let mut output = String::new();
        let diff = TextDiff::from_lines(old, new);

        for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
            if idx > 0 {
                _ = writeln!(output, "{:-^1$}", "-", 80);
            }
            for op in group {
                for change in diff.iter_inline_changes(op) {
                    let (sign, s) = match change.tag() {
                        ChangeTag::Delete => ("-", Style::new().red()),
                        ChangeTag::Insert => ("+", Style::new().green()),
                        ChangeTag::Equal => (" ", Style::new().dim()),
                    };
                    _ = write!(
                        output,
                        "{}{} |{}",
                        style(Line(change.old_index())).dim(),
                        style(Line(change.new_index())).dim(),
                        s.apply_to(sign).bold(),
                    );
                    for (emphasized, value) in change.iter_strings_lossy() {
                        if emphasized {
                            _ = write!(output, "{}", s.apply_to(value).underlined().on_black());
                        } else {
                            _ = write!(output, "{}", s.apply_to(value));
                        }
                    }
                    if change.missing_newline() {
                        _ = writeln!(output);
                    }
                }
            }
        }

        output
    }
}
