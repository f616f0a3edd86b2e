//! The built-in generator definition: prompt schema, filter rules, rename
//! table, content transforms and the post-generation hook sequence. All
//! tables are constructed once per run and read-only thereafter; the
//! pipeline modules consume them without knowing this generator's shape.

use log::debug;
use serde_json::Value;

use crate::error::Result;
use crate::filter::FilterRule;
use crate::hooks::{GenerationContext, HookStep};
use crate::rename::RenameRule;
use crate::schema::{AnswerSet, Question};
use crate::transform::{remove_dependency, TransformRule, Transformed};
use crate::validate;

/// Run-specific inputs the schema's defaults are seeded from: the output
/// folder name and the user's git identity.
#[derive(Debug, Default, Clone)]
pub struct Seed {
    pub folder_name: String,
    pub git_user: Option<String>,
    pub git_email: Option<String>,
}

impl Seed {
    /// Builds a seed from the project name and the user's git config.
    /// A missing or unreadable git config leaves the identity empty.
    pub fn detect(folder_name: &str) -> Self {
        let (git_user, git_email) = match git2::Config::open_default() {
            Ok(config) => (
                config.get_string("user.name").ok(),
                config.get_string("user.email").ok(),
            ),
            Err(e) => {
                debug!("No git config available: {}", e);
                (None, None)
            }
        };
        Self { folder_name: folder_name.to_string(), git_user, git_email }
    }
}

/// Manifest dependency entry removed when the matching feature toggle is
/// declined. The associated entry files are handled by the filter rules.
const FEATURE_DEPENDENCIES: &[(&str, &str)] = &[
    ("web", "express"),
    ("api", "fastify"),
    ("bree", "bree"),
    ("proxy", "http-proxy"),
    ("i18n", "i18n"),
];

fn default_repo(answers: &AnswerSet) -> Value {
    let username = validate::slug(answers.str("username"));
    let name = validate::slug(&validate::slug(answers.str("name")));
    Value::String(format!("https://github.com/{}/{}", username, name))
}

fn needs_i18n_prompt(answers: &AnswerSet) -> bool {
    answers.bool("web") || answers.bool("api")
}

fn prune_manifest(mut manifest: Value, answers: &AnswerSet) -> Transformed {
    for (feature, dependency) in FEATURE_DEPENDENCIES {
        if !answers.bool(feature) {
            remove_dependency(&mut manifest, dependency);
        }
    }
    Transformed::Content(manifest)
}

fn locales_when_i18n(content: Value, answers: &AnswerSet) -> Transformed {
    if answers.bool("i18n") {
        Transformed::Content(content)
    } else {
        Transformed::Drop
    }
}

fn init_repository(ctx: &GenerationContext) -> Result<()> {
    ctx.vcs.init(&ctx.output_dir)
}

fn install_dependencies(ctx: &GenerationContext) -> Result<()> {
    let client = ctx.answers.str("pm");
    let client = if client.is_empty() { "npm" } else { client };
    ctx.package_manager.install(&ctx.output_dir, client)
}

fn show_tips(ctx: &GenerationContext) -> Result<()> {
    println!();
    println!("Your project is ready. Next steps:");
    println!("  cd {}", ctx.answers.str("name"));
    println!("  {} test", ctx.answers.str("pm"));
    Ok(())
}

/// A complete generator definition.
pub struct Generator {
    schema: Vec<Question>,
    filters: Vec<FilterRule>,
    renames: Vec<RenameRule>,
    transforms: Vec<TransformRule>,
    hooks: Vec<HookStep>,
}

impl Generator {
    pub fn new(seed: &Seed) -> Self {
        Self {
            schema: build_schema(seed),
            filters: build_filters(),
            renames: build_renames(),
            transforms: build_transforms(),
            hooks: build_hooks(),
        }
    }

    pub fn schema(&self) -> &[Question] {
        &self.schema
    }

    pub fn filters(&self) -> &[FilterRule] {
        &self.filters
    }

    pub fn renames(&self) -> &[RenameRule] {
        &self.renames
    }

    pub fn transforms(&self) -> &[TransformRule] {
        &self.transforms
    }

    pub fn hooks(&self) -> &[HookStep] {
        &self.hooks
    }
}

fn build_schema(seed: &Seed) -> Vec<Question> {
    vec![
        Question::text("name", "What is the name of the new project")
            .default_value(seed.folder_name.clone())
            .validate(validate::package_name),
        Question::text("description", "How would you describe the new project")
            .default_value("my new project"),
        Question::single_choice("pm", "Choose a package manager", &["npm", "yarn"], "npm")
            .persisted(),
        Question::text("author", "What is your name (the author's)")
            .default_value(seed.git_user.clone().unwrap_or_default())
            .persisted(),
        Question::text("email", "What is your email (the author's)")
            .default_value(seed.git_email.clone().unwrap_or_default())
            .validate(validate::email)
            .persisted(),
        Question::text("website", "What is your personal website (the author's)")
            .validate(validate::optional_url)
            .persisted(),
        Question::text("username", "What is your GitHub username or organization")
            .default_value(seed.git_user.clone().unwrap_or_default())
            .validate(validate::github_username)
            .persisted(),
        Question::text("repo", "What is your GitHub repository's URL")
            .default_fn(default_repo)
            .validate(validate::github_repo_url),
        Question::confirm("web", "Do you need a web server", true),
        Question::confirm("api", "Do you need an API server", true),
        Question::confirm("bree", "Do you need a job scheduler (bree)", true),
        Question::confirm("proxy", "Do you need a proxy (http => https redirect)", true),
        Question::confirm("i18n", "Do you need automatic multi-lingual support", true)
            .visible_if(needs_i18n_prompt),
    ]
}

fn build_filters() -> Vec<FilterRule> {
    vec![
        FilterRule::when("web.js", |a| a.bool("web")),
        FilterRule::when("api.js", |a| a.bool("api")),
        FilterRule::when("bree.js", |a| a.bool("bree")),
        FilterRule::when("proxy.js", |a| a.bool("proxy")),
        FilterRule::when("jobs/**", |a| a.bool("bree")),
        FilterRule::always("test/config/snapshots/**", false),
        FilterRule::always("test/web/snapshots/**", false),
    ]
}

fn build_renames() -> Vec<RenameRule> {
    // Leading-dot files are stored under packaging-safe aliases in the
    // template tree and restored here.
    vec![
        RenameRule::new("gitignore", ".gitignore"),
        RenameRule::new("README", "README.md"),
        RenameRule::new("env", ".env"),
    ]
}

fn build_transforms() -> Vec<TransformRule> {
    vec![
        TransformRule::new("package.json", prune_manifest),
        TransformRule::new("locales/**", locales_when_i18n),
    ]
}

fn build_hooks() -> Vec<HookStep> {
    vec![
        HookStep { name: "init-repository", run: init_repository, fatal: false },
        HookStep { name: "install-dependencies", run: install_dependencies, fatal: true },
        HookStep { name: "show-tips", run: show_tips, fatal: false },
    ]
}
