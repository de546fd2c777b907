//! The batch loop.
//!
//! One run: read the roster, re-header the summary files, then drive each
//! entry through generation, compilation and optional mail delivery, one
//! entry and one external process at a time.

use super::progress::{stdout_sink, LineSink, Progress};
use crate::config::Config;
use crate::error::RunError;
use crate::models::{EntryOutcome, EntryState, RosterEntry, RunRecord, RunSummary};
use crate::roster::{strip_trailing_cr, Roster, RosterLine};
use crate::summary::SummaryWriter;
use crate::tools::{DocumentCompiler, MailAgent, ReportGenerator};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Settings the runner needs from the merged configuration.
#[derive(Clone)]
pub struct RunnerOptions {
    pub outputs_dir: PathBuf,
    /// Report extension without leading dot.
    pub report_extension: String,
    pub state_summary: bool,
    pub show_progress_bar: bool,
    /// Where usernames and PDF paths are written as entries progress.
    pub output: LineSink,
}

impl RunnerOptions {
    pub fn from_config(config: &Config, show_progress_bar: bool) -> Self {
        Self {
            outputs_dir: config.general.outputs_dir.clone(),
            report_extension: config.report_extension().to_string(),
            state_summary: config.general.state_summary,
            show_progress_bar,
            output: stdout_sink(),
        }
    }
}

/// Drives roster entries through the external collaborators.
pub struct BatchRunner<'a> {
    options: RunnerOptions,
    generator: &'a dyn ReportGenerator,
    compiler: &'a dyn DocumentCompiler,
    mailer: Option<&'a dyn MailAgent>,
}

impl<'a> BatchRunner<'a> {
    /// A runner that never sends mail.
    pub fn new(
        options: RunnerOptions,
        generator: &'a dyn ReportGenerator,
        compiler: &'a dyn DocumentCompiler,
    ) -> Self {
        Self {
            options,
            generator,
            compiler,
            mailer: None,
        }
    }

    /// Deliver every compiled PDF through `mailer`.
    pub fn with_mailer(mut self, mailer: &'a dyn MailAgent) -> Self {
        self.mailer = Some(mailer);
        self
    }

    /// Where the generator is expected to leave the report for `username`.
    pub fn report_path(&self, username: &str) -> PathBuf {
        self.options
            .outputs_dir
            .join(format!("{}.{}", username, self.options.report_extension))
    }

    /// Where the compiler is expected to leave the PDF for `username`.
    pub fn pdf_path(&self, username: &str) -> PathBuf {
        self.options.outputs_dir.join(format!("{}.pdf", username))
    }

    /// Process the whole roster.
    ///
    /// Fails only if the roster cannot be read or the summary files cannot
    /// be initialized; every other failure is recorded on its entry.
    pub async fn run(&self, roster_path: &Path) -> Result<RunRecord, RunError> {
        let started_at = Utc::now();

        // Read before touching the outputs directory, so an unreadable
        // roster leaves the previous run's files intact.
        let roster = Roster::load(roster_path)?;
        info!(
            "Loaded {} roster lines from {}",
            roster.len(),
            roster.path().display()
        );

        let summary = SummaryWriter::initialize(&self.options.outputs_dir, self.options.state_summary)?;

        for username in roster.duplicate_usernames() {
            warn!(
                "Username {} appears more than once; later rows overwrite its outputs",
                username
            );
        }

        let progress = if self.options.show_progress_bar {
            Progress::new(roster.len() as u64, self.options.output.clone())
        } else {
            Progress::hidden(self.options.output.clone())
        };

        let mut outcomes = Vec::with_capacity(roster.len());
        for line in roster.lines() {
            let outcome = match line {
                RosterLine::Entry(entry) => self.process_entry(entry, &progress).await,
                RosterLine::Malformed { line, raw, error } => {
                    warn!("Skipping malformed roster line {}: {} ({:?})", line, error, raw);
                    EntryOutcome::malformed(*line, raw, error)
                }
            };
            progress.inc();
            outcomes.push(outcome);
        }
        progress.finish();

        let run_summary = RunSummary::from_outcomes(&outcomes);
        check_summary_rows(&summary, run_summary.generated);

        Ok(RunRecord {
            started_at,
            finished_at: Utc::now(),
            roster: roster_path.to_path_buf(),
            outputs_dir: self.options.outputs_dir.clone(),
            summary: run_summary,
            entries: outcomes,
        })
    }

    /// Drive one entry to a terminal state. Never fails the run.
    async fn process_entry(&self, entry: &RosterEntry, progress: &Progress) -> EntryOutcome {
        let username = strip_trailing_cr(&entry.username);
        progress.set_message(username);
        progress.println(username);
        debug!("Processing line {}: {}", entry.line, username);

        if let Err(e) = self.generator.generate(username, &entry.display_name).await {
            warn!("Report generation failed for {}: {}", username, e);
            return EntryOutcome::new(entry, EntryState::GenerationFailed).with_detail(e);
        }

        let report = self.report_path(username);
        if !report.is_file() {
            warn!(
                "No report produced for {} at {}; skipping compilation",
                username,
                report.display()
            );
            return EntryOutcome::new(entry, EntryState::CompilationSkipped);
        }
        let outcome = EntryOutcome::new(entry, EntryState::CompilationFailed).with_report(report.clone());

        if let Err(e) = self.compiler.compile(&self.options.outputs_dir, &report).await {
            error!("Compilation failed for {}: {}", username, e);
            return outcome.with_detail(e);
        }

        let pdf = self.pdf_path(username);
        if !pdf.is_file() {
            let e = crate::error::ToolError::MissingArtifact { path: pdf };
            error!("Compilation failed for {}: {}", username, e);
            return outcome.with_detail(e);
        }
        progress.println(pdf.display().to_string());

        let outcome = outcome.with_pdf(pdf);
        let Some(mailer) = self.mailer else {
            return EntryOutcome {
                state: EntryState::MailSkipped,
                ..outcome
            };
        };

        match mailer.send(username, &entry.email, &entry.display_name).await {
            Ok(()) => {
                info!("Mailed report to {} <{}>", username, entry.email);
                EntryOutcome {
                    state: EntryState::Mailed,
                    ..outcome
                }
            }
            Err(e) => {
                warn!("Mail delivery failed for {}: {}", username, e);
                EntryOutcome {
                    state: EntryState::MailFailed,
                    ..outcome
                }
                .with_detail(e)
            }
        }
    }
}

fn check_summary_rows(summary: &SummaryWriter, generated: usize) {
    let mismatches = summary_mismatches(summary, generated);
    if mismatches.is_empty() {
        debug!("Summary files match {} generated reports", generated);
    }
    for message in mismatches {
        warn!("{}", message);
    }
}

/// The generator appends one score row per successful report. State rows
/// are optional, so an empty state summary is expected.
fn summary_mismatches(summary: &SummaryWriter, generated: usize) -> Vec<String> {
    let mut mismatches = Vec::new();

    match summary.score_rows() {
        Ok(rows) if rows != generated => mismatches.push(format!(
            "{} has {} data rows but {} reports were generated",
            summary.score_path().display(),
            rows,
            generated
        )),
        Ok(_) => {}
        Err(e) => mismatches.push(format!(
            "Cannot read back {}: {}",
            summary.score_path().display(),
            e
        )),
    }

    if let (Some(path), Ok(Some(rows))) = (summary.state_path(), summary.state_rows()) {
        if rows > 0 && rows != generated {
            mismatches.push(format!(
                "{} has {} data rows but {} reports were generated",
                path.display(),
                rows,
                generated
            ));
        }
    }

    mismatches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolError;
    use crate::summary::{SCORE_SUMMARY_FILE, STATE_SUMMARY_FILE};
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Shared, ordered log of collaborator calls and printed lines.
    type Events = Arc<Mutex<Vec<String>>>;

    fn recording_sink(events: &Events) -> LineSink {
        let events = Arc::clone(events);
        Arc::new(move |line: &str| events.lock().unwrap().push(format!("print {}", line)))
    }

    /// Writes a report and appends a score row, except for usernames in `fail`
    /// (returns an error) or `silent` (succeeds without writing anything).
    struct FakeGenerator {
        outputs: PathBuf,
        fail: HashSet<String>,
        silent: HashSet<String>,
        calls: Mutex<Vec<(String, String)>>,
        events: Events,
    }

    impl FakeGenerator {
        fn new(outputs: &Path) -> Self {
            Self {
                outputs: outputs.to_path_buf(),
                fail: HashSet::new(),
                silent: HashSet::new(),
                calls: Mutex::new(Vec::new()),
                events: Events::default(),
            }
        }

        fn with_events(mut self, events: &Events) -> Self {
            self.events = Arc::clone(events);
            self
        }

        fn failing(mut self, username: &str) -> Self {
            self.fail.insert(username.to_string());
            self
        }

        fn silent(mut self, username: &str) -> Self {
            self.silent.insert(username.to_string());
            self
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReportGenerator for FakeGenerator {
        async fn generate(&self, username: &str, display_name: &str) -> Result<(), ToolError> {
            self.calls
                .lock()
                .unwrap()
                .push((username.to_string(), display_name.to_string()));
            self.events
                .lock()
                .unwrap()
                .push(format!("generate {}", username));

            if self.fail.contains(username) {
                return Err(ToolError::MissingArtifact {
                    path: self.outputs.join(username),
                });
            }
            if self.silent.contains(username) {
                return Ok(());
            }

            std::fs::write(self.outputs.join(format!("{}.tex", username)), "\\documentclass{article}").unwrap();
            let mut summary = std::fs::OpenOptions::new()
                .append(true)
                .open(self.outputs.join(SCORE_SUMMARY_FILE))
                .unwrap();
            writeln!(summary, "{},{},1,1,0", display_name, username).unwrap();
            Ok(())
        }
    }

    /// Writes `<stem>.pdf` next to the report unless told to fail.
    #[derive(Default)]
    struct FakeCompiler {
        fail: bool,
        skip_output: bool,
        calls: Mutex<Vec<PathBuf>>,
        events: Events,
    }

    #[async_trait]
    impl DocumentCompiler for FakeCompiler {
        async fn compile(&self, output_dir: &Path, report: &Path) -> Result<(), ToolError> {
            self.calls.lock().unwrap().push(report.to_path_buf());
            self.events
                .lock()
                .unwrap()
                .push(format!("compile {}", report.display()));
            if self.fail {
                return Err(ToolError::TimedOut {
                    program: "pdflatex".to_string(),
                    seconds: 1,
                });
            }
            if !self.skip_output {
                let stem = report.file_stem().unwrap().to_string_lossy().into_owned();
                std::fs::write(output_dir.join(format!("{}.pdf", stem)), b"%PDF-1.5").unwrap();
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeMailer {
        fail: bool,
        calls: Mutex<Vec<(String, String, String)>>,
    }

    #[async_trait]
    impl MailAgent for FakeMailer {
        async fn send(
            &self,
            username: &str,
            email: &str,
            display_name: &str,
        ) -> Result<(), ToolError> {
            self.calls.lock().unwrap().push((
                username.to_string(),
                email.to_string(),
                display_name.to_string(),
            ));
            if self.fail {
                return Err(ToolError::MissingArtifact {
                    path: PathBuf::from("mail"),
                });
            }
            Ok(())
        }
    }

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new(roster: &str) -> Self {
            let dir = TempDir::new().unwrap();
            std::fs::create_dir(dir.path().join("outputs")).unwrap();
            std::fs::write(dir.path().join("roster.csv"), roster).unwrap();
            Self { dir }
        }

        fn outputs(&self) -> PathBuf {
            self.dir.path().join("outputs")
        }

        fn roster(&self) -> PathBuf {
            self.dir.path().join("roster.csv")
        }

        fn options(&self) -> RunnerOptions {
            RunnerOptions {
                outputs_dir: self.outputs(),
                report_extension: "tex".to_string(),
                state_summary: true,
                show_progress_bar: false,
                output: Arc::new(|_: &str| {}),
            }
        }

        fn output_names(&self) -> Vec<String> {
            let mut names: Vec<String> = std::fs::read_dir(self.outputs())
                .unwrap()
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect();
            names.sort();
            names
        }

        fn summary_rows(&self) -> Vec<String> {
            std::fs::read_to_string(self.outputs().join(SCORE_SUMMARY_FILE))
                .unwrap()
                .lines()
                .map(String::from)
                .collect()
        }
    }

    const ALICE_BOB: &str = "email,name,username\r\nalice@x.edu,Alice A,alice001\r\nbob@x.edu,Bob B,bob002\r\n";

    #[tokio::test]
    async fn test_missing_report_skips_compilation_and_continues() {
        let fixture = Fixture::new(ALICE_BOB);
        let generator = FakeGenerator::new(&fixture.outputs()).silent("bob002");
        let compiler = FakeCompiler::default();

        let runner = BatchRunner::new(fixture.options(), &generator, &compiler);
        let record = runner.run(&fixture.roster()).await.unwrap();

        assert_eq!(
            fixture.output_names(),
            vec![
                "_state_summary.csv",
                "_summary.csv",
                "alice001.pdf",
                "alice001.tex"
            ]
        );
        assert_eq!(
            fixture.summary_rows(),
            vec!["name,username,phase,pr,score", "Alice A,alice001,1,1,0"]
        );
        assert_eq!(
            *compiler.calls.lock().unwrap(),
            vec![fixture.outputs().join("alice001.tex")]
        );

        assert_eq!(record.entries[0].state, EntryState::MailSkipped);
        assert_eq!(record.entries[1].state, EntryState::CompilationSkipped);
        assert_eq!(record.summary.compiled, 1);
        assert_eq!(record.summary.skipped, 1);
    }

    #[tokio::test]
    async fn test_generator_called_once_per_entry_in_order() {
        let fixture = Fixture::new(
            "email,name,username\nc@x.edu,C,carol\na@x.edu,A,alice\nb@x.edu,B,bob\n",
        );
        let generator = FakeGenerator::new(&fixture.outputs());
        let compiler = FakeCompiler::default();

        BatchRunner::new(fixture.options(), &generator, &compiler)
            .run(&fixture.roster())
            .await
            .unwrap();

        let calls = generator.calls();
        assert_eq!(
            calls,
            vec![
                ("carol".to_string(), "C".to_string()),
                ("alice".to_string(), "A".to_string()),
                ("bob".to_string(), "B".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_generator_error_does_not_abort_run() {
        let fixture = Fixture::new(ALICE_BOB);
        let generator = FakeGenerator::new(&fixture.outputs()).failing("alice001");
        let compiler = FakeCompiler::default();

        let record = BatchRunner::new(fixture.options(), &generator, &compiler)
            .run(&fixture.roster())
            .await
            .unwrap();

        assert_eq!(record.entries[0].state, EntryState::GenerationFailed);
        assert!(record.entries[0].detail.is_some());
        assert_eq!(record.entries[1].state, EntryState::MailSkipped);
        assert_eq!(compiler.calls.lock().unwrap().len(), 1);
        assert_eq!(record.summary.failed, 1);
    }

    #[tokio::test]
    async fn test_rerun_rewrites_summary_headers() {
        let fixture = Fixture::new(ALICE_BOB);
        let generator = FakeGenerator::new(&fixture.outputs());
        let compiler = FakeCompiler::default();
        let runner = BatchRunner::new(fixture.options(), &generator, &compiler);

        runner.run(&fixture.roster()).await.unwrap();
        runner.run(&fixture.roster()).await.unwrap();

        assert_eq!(fixture.summary_rows().len(), 3);
        let state = std::fs::read_to_string(fixture.outputs().join(STATE_SUMMARY_FILE)).unwrap();
        assert_eq!(state.lines().count(), 1);
    }

    #[tokio::test]
    async fn test_unreadable_roster_leaves_outputs_untouched() {
        let fixture = Fixture::new(ALICE_BOB);
        std::fs::write(fixture.outputs().join(SCORE_SUMMARY_FILE), "previous run\n").unwrap();
        let generator = FakeGenerator::new(&fixture.outputs());
        let compiler = FakeCompiler::default();

        let result = BatchRunner::new(fixture.options(), &generator, &compiler)
            .run(&fixture.dir.path().join("missing.csv"))
            .await;

        assert!(matches!(result, Err(RunError::RosterUnreadable { .. })));
        assert_eq!(fixture.output_names(), vec!["_summary.csv"]);
        assert_eq!(fixture.summary_rows(), vec!["previous run"]);
        assert!(generator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_outputs_dir_aborts_before_processing() {
        let fixture = Fixture::new(ALICE_BOB);
        let generator = FakeGenerator::new(&fixture.outputs());
        let compiler = FakeCompiler::default();
        let mut options = fixture.options();
        options.outputs_dir = fixture.dir.path().join("nope");

        let result = BatchRunner::new(options, &generator, &compiler)
            .run(&fixture.roster())
            .await;

        assert!(matches!(result, Err(RunError::SummaryInit { .. })));
        assert!(generator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_mail_only_for_compiled_entries() {
        let fixture = Fixture::new(
            "email,name,username\na@x.edu,A,alice\nb@x.edu,B,bob\nc@x.edu,C,carol\n",
        );
        let generator = FakeGenerator::new(&fixture.outputs())
            .failing("bob")
            .silent("carol");
        let compiler = FakeCompiler::default();
        let mailer = FakeMailer::default();

        let record = BatchRunner::new(fixture.options(), &generator, &compiler)
            .with_mailer(&mailer)
            .run(&fixture.roster())
            .await
            .unwrap();

        assert_eq!(
            *mailer.calls.lock().unwrap(),
            vec![("alice".to_string(), "a@x.edu".to_string(), "A".to_string())]
        );
        assert_eq!(record.summary.mailed, 1);
        assert_eq!(record.entries[0].state, EntryState::Mailed);
    }

    #[tokio::test]
    async fn test_compile_failure_is_entry_local_and_not_mailed() {
        let fixture = Fixture::new(ALICE_BOB);
        let generator = FakeGenerator::new(&fixture.outputs());
        let compiler = FakeCompiler {
            fail: true,
            ..FakeCompiler::default()
        };
        let mailer = FakeMailer::default();

        let record = BatchRunner::new(fixture.options(), &generator, &compiler)
            .with_mailer(&mailer)
            .run(&fixture.roster())
            .await
            .unwrap();

        assert!(record
            .entries
            .iter()
            .all(|e| e.state == EntryState::CompilationFailed));
        assert_eq!(compiler.calls.lock().unwrap().len(), 2);
        assert!(mailer.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_compiler_success_without_pdf_is_failure() {
        let fixture = Fixture::new(ALICE_BOB);
        let generator = FakeGenerator::new(&fixture.outputs());
        let compiler = FakeCompiler {
            skip_output: true,
            ..FakeCompiler::default()
        };

        let record = BatchRunner::new(fixture.options(), &generator, &compiler)
            .run(&fixture.roster())
            .await
            .unwrap();

        assert_eq!(record.entries[0].state, EntryState::CompilationFailed);
        assert!(record.entries[0]
            .detail
            .as_deref()
            .unwrap()
            .contains("alice001.pdf"));
    }

    #[tokio::test]
    async fn test_mail_failure_is_best_effort() {
        let fixture = Fixture::new(ALICE_BOB);
        let generator = FakeGenerator::new(&fixture.outputs());
        let compiler = FakeCompiler::default();
        let mailer = FakeMailer {
            fail: true,
            ..FakeMailer::default()
        };

        let record = BatchRunner::new(fixture.options(), &generator, &compiler)
            .with_mailer(&mailer)
            .run(&fixture.roster())
            .await
            .unwrap();

        assert_eq!(mailer.calls.lock().unwrap().len(), 2);
        assert_eq!(record.summary.mail_failed, 2);
        assert_eq!(record.summary.failed, 0);
        assert_eq!(record.summary.compiled, 2);
    }

    #[tokio::test]
    async fn test_malformed_line_is_skipped() {
        let fixture = Fixture::new(
            "email,name,username\na@x.edu,A,alice\nnot a valid row\nb@x.edu,B,bob\n",
        );
        let generator = FakeGenerator::new(&fixture.outputs());
        let compiler = FakeCompiler::default();

        let record = BatchRunner::new(fixture.options(), &generator, &compiler)
            .run(&fixture.roster())
            .await
            .unwrap();

        assert_eq!(generator.calls().len(), 2);
        assert_eq!(record.entries[1].state, EntryState::Malformed);
        assert_eq!(record.entries[1].line, 3);
        assert_eq!(record.entries[2].state, EntryState::MailSkipped);
        assert_eq!(record.summary.total, 3);
        assert_eq!(record.summary.failed, 1);
    }

    #[tokio::test]
    async fn test_duplicate_usernames_processed_twice() {
        let fixture = Fixture::new("email,name,username\na@x.edu,A,alice\na@x.edu,A,alice\n");
        let generator = FakeGenerator::new(&fixture.outputs());
        let compiler = FakeCompiler::default();

        BatchRunner::new(fixture.options(), &generator, &compiler)
            .run(&fixture.roster())
            .await
            .unwrap();

        assert_eq!(generator.calls().len(), 2);
        assert_eq!(compiler.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_progress_lines_bracket_tool_calls() {
        let fixture = Fixture::new(ALICE_BOB);
        let events = Events::default();
        let generator = FakeGenerator::new(&fixture.outputs())
            .silent("bob002")
            .with_events(&events);
        let compiler = FakeCompiler {
            events: Arc::clone(&events),
            ..FakeCompiler::default()
        };
        let mut options = fixture.options();
        options.output = recording_sink(&events);

        BatchRunner::new(options, &generator, &compiler)
            .run(&fixture.roster())
            .await
            .unwrap();

        let outputs = fixture.outputs();
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "print alice001".to_string(),
                "generate alice001".to_string(),
                format!("compile {}", outputs.join("alice001.tex").display()),
                format!("print {}", outputs.join("alice001.pdf").display()),
                "print bob002".to_string(),
                "generate bob002".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_no_pdf_line_after_failed_compile() {
        let fixture = Fixture::new(ALICE_BOB);
        let events = Events::default();
        let generator = FakeGenerator::new(&fixture.outputs()).with_events(&events);
        let compiler = FakeCompiler {
            fail: true,
            events: Arc::clone(&events),
            ..FakeCompiler::default()
        };
        let mut options = fixture.options();
        options.output = recording_sink(&events);

        BatchRunner::new(options, &generator, &compiler)
            .run(&fixture.roster())
            .await
            .unwrap();

        let events = events.lock().unwrap();
        let printed: Vec<_> = events.iter().filter(|e| e.starts_with("print ")).collect();
        assert_eq!(printed, vec!["print alice001", "print bob002"]);
    }

    #[test]
    fn test_empty_state_summary_is_not_a_mismatch() {
        let fixture = Fixture::new(ALICE_BOB);
        let summary = SummaryWriter::initialize(&fixture.outputs(), true).unwrap();
        let mut score = std::fs::OpenOptions::new()
            .append(true)
            .open(summary.score_path())
            .unwrap();
        writeln!(score, "Alice A,alice001,1,1,0").unwrap();
        writeln!(score, "Bob B,bob002,1,1,0").unwrap();
        assert!(summary_mismatches(&summary, 2).is_empty());

        let mut state = std::fs::OpenOptions::new()
            .append(true)
            .open(summary.state_path().unwrap())
            .unwrap();
        writeln!(state, "Alice A,alice001,1,1,open,0,").unwrap();
        let mismatches = summary_mismatches(&summary, 2);
        assert_eq!(mismatches.len(), 1);
        assert!(mismatches[0].contains(STATE_SUMMARY_FILE));

        assert_eq!(summary_mismatches(&summary, 3).len(), 2);
    }

    #[test]
    fn test_artifact_paths() {
        let generator = FakeGenerator::new(Path::new("outputs"));
        let compiler = FakeCompiler::default();
        let options = RunnerOptions {
            outputs_dir: PathBuf::from("outputs"),
            report_extension: "md".to_string(),
            state_summary: false,
            show_progress_bar: false,
            output: Arc::new(|_: &str| {}),
        };
        let runner = BatchRunner::new(options, &generator, &compiler);

        assert_eq!(runner.report_path("alice001"), Path::new("outputs").join("alice001.md"));
        assert_eq!(runner.pdf_path("alice001"), Path::new("outputs").join("alice001.pdf"));
    }
}
