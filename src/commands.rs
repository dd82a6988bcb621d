use std::io::{self, Write};

use anyhow::{bail, Context, Result};

use crate::{
    api::{
        wire::{join_tags, parse_entry_date, parse_entry_time},
        EntryQuery,
    },
    draft::{DraftEdit, EditorMode},
    models::{Category, LogEntry, Mood, AI_MODELS},
    settings::{GithubEdit, SettingsEdit},
    sync::FetchOutcome,
    timeline::TimelineView,
    view::{View, ViewController},
};

fn loaded(outcome: FetchOutcome, what: &str) -> Result<()> {
    match outcome {
        FetchOutcome::Failed(err) => Err(err).with_context(|| format!("Failed to load {what}")),
        FetchOutcome::Cancelled => bail!("Loading {what} was cancelled"),
        FetchOutcome::Applied | FetchOutcome::Stale => Ok(()),
    }
}

fn print_entry(entry: &LogEntry) {
    let mood = entry.mood.map(|mood| mood.as_str()).unwrap_or("-");
    println!(
        "#{} | {} {} | {} | {}{}",
        entry.id,
        entry.entry_date.format("%Y-%m-%d"),
        entry.display_time(),
        entry.category.as_str(),
        mood,
        if entry.is_from_github() { " | GitHub" } else { "" }
    );
    if !entry.tags.is_empty() {
        println!("tags: {}", join_tags(&entry.tags));
    }
    println!("{}", entry.content.trim_end());
    println!("-----------------------------");
}

pub async fn handle_timeline(views: &ViewController, date: Option<String>) -> Result<()> {
    let date = date
        .as_deref()
        .map(parse_entry_date)
        .transpose()
        .context("Invalid date format. Use YYYY-MM-DD.")?;

    let timeline = views.timeline();
    timeline.set_query(EntryQuery { date }).await;
    loaded(views.refresh_entries().await, "entries")?;

    match timeline.view().await {
        TimelineView::Entries(entries) => entries.iter().for_each(print_entry),
        TimelineView::Empty | TimelineView::Loading => println!("No entries yet."),
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn handle_new(
    views: &ViewController,
    content: String,
    tags: Option<String>,
    category: Option<String>,
    mood: Option<String>,
    date: Option<String>,
    time: Option<String>,
    polish: bool,
) -> Result<()> {
    views.navigate(View::NewEntry).await;
    let drafts = views.drafts();

    drafts.edit(DraftEdit::Content(content)).await;
    if let Some(tags) = tags {
        drafts.edit(DraftEdit::Tags(tags)).await;
    }
    if let Some(category) = category {
        drafts.edit(DraftEdit::Category(Category::parse(&category))).await;
    }
    if let Some(mood) = mood {
        let mood = Mood::parse(&mood).with_context(|| format!("Unknown mood '{mood}'"))?;
        drafts.edit(DraftEdit::Mood(mood)).await;
    }
    if let Some(date) = date {
        let date = parse_entry_date(&date).context("Invalid date format. Use YYYY-MM-DD.")?;
        drafts.edit(DraftEdit::Date(date)).await;
    }
    if let Some(time) = time {
        let time = parse_entry_time(&time).context("Invalid time format. Use HH:MM.")?;
        drafts.edit(DraftEdit::Time(time)).await;
    }

    if polish {
        views.polish_draft().await?;
        drafts.set_mode(EditorMode::Preview).await;
        println!("Polished draft:\n{}\n", drafts.get_state().await.draft().content);
    }

    views.submit_draft().await?;
    println!("✓ Entry recorded.");
    Ok(())
}

pub async fn handle_delete(views: &ViewController, id: i64, yes: bool) -> Result<()> {
    if !yes {
        print!("Delete entry #{id}? This cannot be undone. (y/N): ");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled. Nothing was deleted.");
            return Ok(());
        }
    }

    views.delete_entry(id).await?;
    println!("✓ Entry #{id} deleted.");
    Ok(())
}

pub async fn handle_personas(views: &ViewController) -> Result<()> {
    views.navigate(View::Personas).await;
    loaded(views.refresh_personas().await, "personas")?;

    for persona in views.personas().personas().await {
        println!(
            "{} #{} {}{}",
            if persona.is_active { "*" } else { " " },
            persona.id,
            persona.name,
            if persona.is_custom { " (custom)" } else { "" }
        );
        if let Some(description) = persona.description.filter(|d| !d.trim().is_empty()) {
            println!("     {description}");
        }
    }
    Ok(())
}

pub async fn handle_activate(views: &ViewController, id: i64) -> Result<()> {
    views.navigate(View::Personas).await;
    loaded(views.refresh_personas().await, "personas")?;

    views.activate_persona(id).await?;
    if let Some(active) = views.personas().active().await {
        println!("✓ {} is now active.", active.name);
    }
    Ok(())
}

async fn open_settings(views: &ViewController) -> Result<()> {
    views.navigate(View::Settings).await;
    if views.settings().settings().await.is_none() {
        bail!("Failed to load settings from the server");
    }
    if views.settings().github().await.is_none() {
        bail!("Failed to load the GitHub integration from the server");
    }
    Ok(())
}

async fn print_settings(views: &ViewController) -> Result<()> {
    let form = views
        .settings()
        .settings()
        .await
        .context("Settings are not loaded")?;
    println!("username:  {}", form.username);
    println!("AI model:  {}", form.ai_model_name);
    println!("API key:   {}", form.ai_api_key.placeholder());
    if let Some(provider) = &form.ai_provider {
        println!("provider:  {provider}");
    }
    if let Some(theme) = &form.theme {
        println!("theme:     {theme}");
    }
    println!("local AI:  {}", if form.use_local_ai { "yes" } else { "no" });
    Ok(())
}

async fn print_github(views: &ViewController) -> Result<()> {
    let form = views
        .settings()
        .github()
        .await
        .context("GitHub integration is not loaded")?;
    let repo = if form.repo_name.is_empty() { "-" } else { form.repo_name.as_str() };
    println!("repository: {repo}");
    println!("token:      {}", form.token.placeholder());
    println!("active:     {}", if form.is_active { "yes" } else { "no" });
    Ok(())
}

pub async fn handle_settings(views: &ViewController) -> Result<()> {
    open_settings(views).await?;
    print_settings(views).await
}

pub async fn handle_set_settings(
    views: &ViewController,
    username: Option<String>,
    model: Option<String>,
    api_key: Option<String>,
) -> Result<()> {
    open_settings(views).await?;
    let settings = views.settings();
    if let Some(username) = username {
        settings.edit_settings(SettingsEdit::Username(username)).await?;
    }
    if let Some(model) = model {
        settings.edit_settings(SettingsEdit::Model(model)).await?;
    }
    if let Some(api_key) = api_key {
        settings.edit_settings(SettingsEdit::ApiKey(api_key)).await?;
    }

    views.save_settings().await?;
    println!("✓ Settings saved.");
    print_settings(views).await
}

pub async fn handle_github(views: &ViewController) -> Result<()> {
    open_settings(views).await?;
    print_github(views).await
}

pub async fn handle_set_github(
    views: &ViewController,
    repo: Option<String>,
    token: Option<String>,
    active: Option<bool>,
) -> Result<()> {
    open_settings(views).await?;
    let settings = views.settings();
    if let Some(repo) = repo {
        settings.edit_github(GithubEdit::RepoName(repo)).await?;
    }
    if let Some(token) = token {
        settings.edit_github(GithubEdit::Token(token)).await?;
    }
    if let Some(active) = active {
        settings.edit_github(GithubEdit::SetActive(active)).await?;
    }

    views.save_github().await?;
    println!("✓ GitHub integration saved.");
    print_github(views).await
}

pub async fn handle_chat(views: &ViewController, message: String) -> Result<()> {
    let reply = views.chat(&message).await?;
    println!("{reply}");
    Ok(())
}

pub fn handle_models() {
    for model in AI_MODELS {
        println!("{:<24} {}", model.id, model.label);
    }
}
