//! The study tools the mentor may call: saving notes, solutions and formula
//! sheets to disk, and opening physics searches and websites in the browser.
//!
//! Every tool reports its outcome as status text. Filesystem and browser
//! failures are caught here and returned as `❌ ...` strings so the
//! conversation carries on; only malformed arguments surface as errors, and
//! the [`ToolRegistry`] turns those into text too.
//!
//! File names come from [`sanitize_file_stem`]: spaces and path separators
//! become `_`. Distinct inputs that sanitize identically (`Newton Laws` and
//! `Newton_Laws`) share a file and the later write wins.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};
use url::Url;

use super::browser::Browser;
use super::catalog::StudyCatalog;
use super::registry::ToolRegistry;
use super::tool::{AgentTool, Tool};
use super::types::AgentToolParameters;
use crate::error::MentorError;

pub const CREATE_NOTES: &str = "create_physics_notes";
pub const SAVE_SOLUTION: &str = "save_physics_solution";
pub const SEARCH_VIDEOS: &str = "search_physics_videos";
pub const SEARCH_RESOURCES: &str = "search_physics_resources";
pub const OPEN_SITE: &str = "open_physics_websites";
pub const CREATE_FORMULA_SHEET: &str = "create_formula_sheet";

const YOUTUBE_SEARCH: (&str, &str) = ("https://www.youtube.com/results", "search_query");
const GOOGLE_SEARCH: (&str, &str) = ("https://www.google.com/search", "q");

/// Where the study tools write files and how they reach the browser.
pub struct StudyEnvironment {
    output_dir: PathBuf,
    browser: Arc<dyn Browser>,
    catalog: StudyCatalog,
}

impl StudyEnvironment {
    pub fn new(output_dir: impl Into<PathBuf>, browser: Arc<dyn Browser>) -> Self {
        Self {
            output_dir: output_dir.into(),
            browser,
            catalog: StudyCatalog::default(),
        }
    }

    pub fn with_catalog(mut self, catalog: StudyCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn catalog(&self) -> &StudyCatalog {
        &self.catalog
    }

    /// Short name used in status text, e.g. `Desktop`.
    pub fn location_label(&self) -> String {
        self.output_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.output_dir.display().to_string())
    }

    async fn write_file(&self, file_name: &str, content: &str) -> Result<PathBuf, MentorError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(file_name);
        tokio::fs::write(&path, content).await?;
        info!(path = %path.display(), bytes = content.len(), "wrote study file");
        Ok(path)
    }
}

impl std::fmt::Debug for StudyEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudyEnvironment")
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

/// Replace spaces and path separators with `_`.
pub fn sanitize_file_stem(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect()
}

pub fn notes_file_name(topic: &str) -> String {
    format!("Physics_Notes_{}.txt", sanitize_file_stem(topic))
}

pub fn solution_file_name(problem_title: &str) -> String {
    format!("Physics_Solution_{}.txt", sanitize_file_stem(problem_title))
}

pub fn formula_sheet_file_name(exam_type: &str) -> String {
    format!(
        "Physics_Formulas_{}.txt",
        sanitize_file_stem(&exam_type.to_uppercase())
    )
}

/// `base` with `param=query` appended, form-encoded (spaces as `+`).
pub fn search_url(base: &str, param: &str, query: &str) -> Result<String, MentorError> {
    let mut url = Url::parse(base)
        .map_err(|e| MentorError::InvalidArgument(format!("invalid search endpoint {base}: {e}")))?;
    url.query_pairs_mut().append_pair(param, query);
    Ok(url.into())
}

fn open_search(
    env: &StudyEnvironment,
    (base, param): (&str, &str),
    query: &str,
) -> Result<String, MentorError> {
    let url = search_url(base, param, query)?;
    env.browser.open(&url)?;
    Ok(url)
}

fn notes_document(topic: &str, content: &str) -> String {
    format!(
        "📚 PHYSICS NOTES - {}\n{}\n\n{content}\n\n📝 Created by Physics Mentor\n",
        topic.to_uppercase(),
        "=".repeat(50)
    )
}

fn solution_document(problem_title: &str, solution: &str) -> String {
    format!(
        "🎯 PHYSICS PROBLEM SOLUTION\n{}\n\nProblem: {problem_title}\n\n{solution}\n\n✅ Solved by Physics Mentor\n",
        "=".repeat(40)
    )
}

/// Save notes on a topic.
pub async fn create_notes(env: &StudyEnvironment, topic: &str, content: &str) -> String {
    let file_name = notes_file_name(topic);
    match env.write_file(&file_name, &notes_document(topic, content)).await {
        Ok(_) => format!(
            "✅ Physics notes for '{topic}' saved to {} as {file_name}",
            env.location_label()
        ),
        Err(e) => {
            warn!(tool = CREATE_NOTES, error = %e, "failed to write notes");
            format!("❌ Error creating physics notes: {e}")
        }
    }
}

/// Save a worked solution.
pub async fn save_solution(env: &StudyEnvironment, problem_title: &str, solution: &str) -> String {
    let file_name = solution_file_name(problem_title);
    match env
        .write_file(&file_name, &solution_document(problem_title, solution))
        .await
    {
        Ok(_) => format!(
            "✅ Solution for '{problem_title}' saved to {} as {file_name}",
            env.location_label()
        ),
        Err(e) => {
            warn!(tool = SAVE_SOLUTION, error = %e, "failed to write solution");
            format!("❌ Error saving solution: {e}")
        }
    }
}

/// Open a YouTube search for tutorial videos on a topic.
pub fn search_videos(env: &StudyEnvironment, topic: &str) -> String {
    let query = format!("physics {topic} tutorial explanation");
    match open_search(env, YOUTUBE_SEARCH, &query) {
        Ok(url) => format!("🎥 Opened YouTube search for physics videos on: '{topic}' ({url})"),
        Err(e) => format!("❌ Error searching physics videos: {e}"),
    }
}

/// Open a Google search for explanations and practice problems on a topic.
pub fn search_resources(env: &StudyEnvironment, topic: &str) -> String {
    let query = format!("physics {topic} explanation examples problems");
    match open_search(env, GOOGLE_SEARCH, &query) {
        Ok(url) => format!("🔍 Opened Google search for physics resources on: '{topic}' ({url})"),
        Err(e) => format!("❌ Error searching physics resources: {e}"),
    }
}

/// Open a known physics website, or list the known ones.
pub fn open_site(env: &StudyEnvironment, site_type: &str) -> String {
    let Some(site) = env.catalog.site(site_type) else {
        return format!(
            "⚠️ '{site_type}' not found. Available physics sites: {}",
            env.catalog.site_display_names().join(", ")
        );
    };

    match env.browser.open(site.url) {
        Ok(()) => format!("🌐 Opened {site_type}: {}", site.url),
        Err(e) => format!("❌ Error opening {site_type}: {e}"),
    }
}

/// Write the formula sheet for an exam. Unknown exams get a generic sheet.
pub async fn create_formula_sheet(env: &StudyEnvironment, exam_type: &str) -> String {
    let exam = exam_type.to_uppercase();
    let file_name = formula_sheet_file_name(exam_type);
    let content = env.catalog.formula_sheet(&exam);
    match env.write_file(&file_name, content).await {
        Ok(_) => format!(
            "✅ {exam} physics formula sheet created on {} as {file_name}",
            env.location_label()
        ),
        Err(e) => {
            warn!(tool = CREATE_FORMULA_SHEET, error = %e, "failed to write formula sheet");
            format!("❌ Error creating formula sheet: {e}")
        }
    }
}

/// The six study tools, wired to `env`.
pub fn study_tools(env: Arc<StudyEnvironment>) -> Vec<Arc<dyn Tool>> {
    let notes_env = env.clone();
    let solution_env = env.clone();
    let videos_env = env.clone();
    let resources_env = env.clone();
    let site_env = env.clone();
    let sheet_env = env;

    vec![
        Arc::new(AgentTool::new(
            CREATE_NOTES,
            "Create a physics notes file for a specific topic.",
            AgentToolParameters::object()
                .string("topic", "Physics topic the notes cover", true)
                .string("content", "Body of the notes", true)
                .build(),
            move |args| {
                let env = notes_env.clone();
                async move {
                    let topic = args.get_str("topic")?;
                    let content = args.get_str("content")?;
                    Ok(create_notes(&env, &topic, &content).await)
                }
            },
        )),
        Arc::new(AgentTool::new(
            SAVE_SOLUTION,
            "Save a physics problem solution to a file.",
            AgentToolParameters::object()
                .string("problem_title", "Short title of the problem", true)
                .string("solution", "Step-by-step solution text", true)
                .build(),
            move |args| {
                let env = solution_env.clone();
                async move {
                    let title = args.get_str("problem_title")?;
                    let solution = args.get_str("solution")?;
                    Ok(save_solution(&env, &title, &solution).await)
                }
            },
        )),
        Arc::new(AgentTool::new(
            SEARCH_VIDEOS,
            "Search YouTube for physics educational videos on a specific topic.",
            AgentToolParameters::object()
                .string("topic", "Physics topic to search videos for", true)
                .build(),
            move |args| {
                let env = videos_env.clone();
                async move { Ok(search_videos(&env, &args.get_str("topic")?)) }
            },
        )),
        Arc::new(AgentTool::new(
            SEARCH_RESOURCES,
            "Search Google for physics educational resources on a specific topic.",
            AgentToolParameters::object()
                .string("topic", "Physics topic to search resources for", true)
                .build(),
            move |args| {
                let env = resources_env.clone();
                async move { Ok(search_resources(&env, &args.get_str("topic")?)) }
            },
        )),
        Arc::new(AgentTool::new(
            OPEN_SITE,
            "Open popular physics educational websites.",
            AgentToolParameters::object()
                .string(
                    "site_type",
                    "Website name, e.g. khan_academy, hyperphysics, feynman_lectures",
                    true,
                )
                .build(),
            move |args| {
                let env = site_env.clone();
                async move { Ok(open_site(&env, &args.get_str("site_type")?)) }
            },
        )),
        Arc::new(AgentTool::new(
            CREATE_FORMULA_SHEET,
            "Create a formula sheet for specific physics exams.",
            AgentToolParameters::object()
                .string("exam_type", "Exam name: MDCAT, NEET or JEE", true)
                .build(),
            move |args| {
                let env = sheet_env.clone();
                async move {
                    let exam_type = args.get_str("exam_type")?;
                    Ok(create_formula_sheet(&env, &exam_type).await)
                }
            },
        )),
    ]
}

/// A registry holding the six study tools.
pub fn study_registry(env: Arc<StudyEnvironment>) -> ToolRegistry {
    study_tools(env)
        .into_iter()
        .fold(ToolRegistry::new(), |registry, tool| registry.with_tool(tool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingBrowser {
        opened: Mutex<Vec<String>>,
    }

    impl Browser for RecordingBrowser {
        fn open(&self, url: &str) -> Result<(), MentorError> {
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    struct BrokenBrowser;

    impl Browser for BrokenBrowser {
        fn open(&self, _url: &str) -> Result<(), MentorError> {
            Err(MentorError::Browser("no display".into()))
        }
    }

    fn env_in(dir: &Path) -> (StudyEnvironment, Arc<RecordingBrowser>) {
        let browser = Arc::new(RecordingBrowser::default());
        (StudyEnvironment::new(dir, browser.clone()), browser)
    }

    #[test]
    fn file_names_are_deterministic() {
        assert_eq!(notes_file_name("Newton Laws"), "Physics_Notes_Newton_Laws.txt");
        assert_eq!(notes_file_name("Newton Laws"), notes_file_name("Newton Laws"));
        assert_eq!(
            solution_file_name("Projectile / range"),
            "Physics_Solution_Projectile___range.txt"
        );
        assert_eq!(formula_sheet_file_name("neet"), "Physics_Formulas_NEET.txt");
    }

    #[test]
    fn search_url_encodes_like_a_form() {
        assert_eq!(
            search_url(GOOGLE_SEARCH.0, GOOGLE_SEARCH.1, "physics E=mc² & more").unwrap(),
            "https://www.google.com/search?q=physics+E%3Dmc%C2%B2+%26+more"
        );
        assert!(matches!(
            search_url("not a url", "q", "optics"),
            Err(MentorError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn notes_are_written_with_header_and_footer() {
        let dir = TempDir::new().unwrap();
        let (env, _) = env_in(dir.path());

        let status = create_notes(&env, "Newton Laws", "F = ma").await;

        assert!(status.starts_with("✅"));
        assert!(status.contains("Physics_Notes_Newton_Laws.txt"));
        let written =
            std::fs::read_to_string(dir.path().join("Physics_Notes_Newton_Laws.txt")).unwrap();
        assert_eq!(
            written,
            format!(
                "📚 PHYSICS NOTES - NEWTON LAWS\n{}\n\nF = ma\n\n📝 Created by Physics Mentor\n",
                "=".repeat(50)
            )
        );
    }

    #[tokio::test]
    async fn colliding_topics_overwrite_each_other() {
        let dir = TempDir::new().unwrap();
        let (env, _) = env_in(dir.path());

        create_notes(&env, "Newton Laws", "first").await;
        create_notes(&env, "Newton_Laws", "second").await;

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let written =
            std::fs::read_to_string(dir.path().join("Physics_Notes_Newton_Laws.txt")).unwrap();
        assert!(written.contains("second"));
        assert!(written.contains("PHYSICS NOTES - NEWTON_LAWS"));
    }

    #[tokio::test]
    async fn solution_file_contains_problem_title() {
        let dir = TempDir::new().unwrap();
        let (env, _) = env_in(dir.path());

        let status = save_solution(&env, "Inclined plane", "a = g sin θ").await;

        assert!(status.contains("Physics_Solution_Inclined_plane.txt"));
        let written =
            std::fs::read_to_string(dir.path().join("Physics_Solution_Inclined_plane.txt"))
                .unwrap();
        assert!(written.starts_with("🎯 PHYSICS PROBLEM SOLUTION\n"));
        assert!(written.contains("Problem: Inclined plane\n\na = g sin θ"));
        assert!(written.ends_with("✅ Solved by Physics Mentor\n"));
    }

    #[tokio::test]
    async fn write_failures_become_error_text() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file in the way").unwrap();
        let (env, _) = env_in(&blocker);

        let notes = create_notes(&env, "optics", "lenses").await;
        let sheet = create_formula_sheet(&env, "JEE").await;

        assert!(notes.starts_with("❌ Error creating physics notes:"));
        assert!(sheet.starts_with("❌ Error creating formula sheet:"));
    }

    #[tokio::test]
    async fn unknown_exam_still_writes_generic_sheet() {
        let dir = TempDir::new().unwrap();
        let (env, _) = env_in(dir.path());

        let status = create_formula_sheet(&env, "sat").await;

        assert_eq!(
            status,
            format!(
                "✅ SAT physics formula sheet created on {} as Physics_Formulas_SAT.txt",
                env.location_label()
            )
        );
        let written =
            std::fs::read_to_string(dir.path().join("Physics_Formulas_SAT.txt")).unwrap();
        assert_eq!(written, "Formula sheet for general physics topics");
    }

    #[test]
    fn searches_open_encoded_urls() {
        let dir = TempDir::new().unwrap();
        let (env, browser) = env_in(dir.path());

        let videos = search_videos(&env, "projectile motion");
        let resources = search_resources(&env, "optics");

        let opened = browser.opened.lock().unwrap().clone();
        assert_eq!(
            opened,
            vec![
                "https://www.youtube.com/results?search_query=physics+projectile+motion+tutorial+explanation".to_string(),
                "https://www.google.com/search?q=physics+optics+explanation+examples+problems".to_string(),
            ]
        );
        assert!(videos.starts_with("🎥 Opened YouTube search"));
        assert!(videos.contains(&opened[0]));
        assert!(resources.contains(&opened[1]));
    }

    #[tokio::test]
    async fn custom_catalog_replaces_sites_and_sheets() {
        use crate::tools::catalog::{FormulaSheet, Site};

        static SITES: [Site; 1] = [Site {
            key: "physik_portal",
            url: "https://example.org/physik",
        }];
        static SHEETS: [FormulaSheet; 1] = [FormulaSheet {
            exam: "ABITUR",
            content: "F = m · a",
        }];

        let dir = TempDir::new().unwrap();
        let (env, browser) = env_in(dir.path());
        let env = env.with_catalog(StudyCatalog {
            sites: &SITES,
            formula_sheets: &SHEETS,
            generic_formula_sheet: "Allgemeine Formeln",
        });

        assert_eq!(
            open_site(&env, "Physik Portal"),
            "🌐 Opened Physik Portal: https://example.org/physik"
        );
        assert_eq!(
            open_site(&env, "khan_academy"),
            "⚠️ 'khan_academy' not found. Available physics sites: Physik Portal"
        );
        assert_eq!(*browser.opened.lock().unwrap(), vec!["https://example.org/physik"]);

        create_formula_sheet(&env, "abitur").await;
        create_formula_sheet(&env, "NEET").await;
        let abitur =
            std::fs::read_to_string(dir.path().join("Physics_Formulas_ABITUR.txt")).unwrap();
        let neet = std::fs::read_to_string(dir.path().join("Physics_Formulas_NEET.txt")).unwrap();
        assert_eq!(abitur, "F = m · a");
        assert_eq!(neet, "Allgemeine Formeln");
    }

    #[test]
    fn known_site_opens_its_url() {
        let dir = TempDir::new().unwrap();
        let (env, browser) = env_in(dir.path());

        let status = open_site(&env, "Khan Academy");

        assert_eq!(
            status,
            "🌐 Opened Khan Academy: https://www.khanacademy.org/science/physics"
        );
        assert_eq!(browser.opened.lock().unwrap().len(), 1);
    }

    #[test]
    fn unknown_site_lists_keys_without_opening() {
        let dir = TempDir::new().unwrap();
        let (env, browser) = env_in(dir.path());

        let status = open_site(&env, "arxiv");

        assert_eq!(
            status,
            "⚠️ 'arxiv' not found. Available physics sites: Khan Academy, Physics Classroom, \
             Hyperphysics, Physics World, Mit Physics, Feynman Lectures, Physics Forums, \
             Wolfram Physics, Nist, Physics Today"
        );
        assert!(browser.opened.lock().unwrap().is_empty());
    }

    #[test]
    fn browser_failures_become_error_text() {
        let dir = TempDir::new().unwrap();
        let env = StudyEnvironment::new(dir.path(), Arc::new(BrokenBrowser));

        assert!(search_videos(&env, "waves").starts_with("❌ Error searching physics videos:"));
        assert!(search_resources(&env, "waves")
            .starts_with("❌ Error searching physics resources:"));
        assert_eq!(
            open_site(&env, "nist"),
            "❌ Error opening nist: Browser error: no display"
        );
    }

    #[tokio::test]
    async fn registry_exposes_all_six_tools() {
        let dir = TempDir::new().unwrap();
        let (env, _) = env_in(dir.path());
        let registry = study_registry(Arc::new(env));

        assert_eq!(
            registry.names(),
            vec![
                CREATE_NOTES,
                SAVE_SOLUTION,
                SEARCH_VIDEOS,
                SEARCH_RESOURCES,
                OPEN_SITE,
                CREATE_FORMULA_SHEET
            ]
        );
        for def in registry.definitions() {
            assert_eq!(def.parameters["type"], "object");
            assert!(!def.parameters["required"].as_array().unwrap().is_empty());
        }
    }
}
