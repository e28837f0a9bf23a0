use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use profile_wizard::config::StoreConfig;
use profile_wizard::profile::{DraftProfile, Profile, ValidationErrors};
use profile_wizard::store::{LibSqlSlot, ProfileStore};
use profile_wizard::wizard::{SaveOutcome, WizardManager, WizardStep};

type StdinLines = Lines<BufReader<Stdin>>;

/// Outcome of one field prompt.
#[derive(Clone, Copy, PartialEq)]
enum Flow {
    Continue,
    Back,
    Cancel,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let db_path = std::env::var("PROFILE_WIZARD_DB_PATH")
        .unwrap_or_else(|_| "./data/profiles.db".to_string());

    eprintln!("👤 Profile Wizard v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Database: {}", db_path);
    eprintln!("   Commands: list, new, edit <n>, delete <n>, quit\n");

    let slot = Arc::new(
        LibSqlSlot::new_local(std::path::Path::new(&db_path))
            .await
            .unwrap_or_else(|e| {
                eprintln!("Error: Failed to open storage at {}: {}", db_path, e);
                std::process::exit(1);
            }),
    );
    let store = ProfileStore::new(slot, StoreConfig::default());
    store.load().await;

    let wizard = WizardManager::new(store.clone());

    let stdin = tokio::io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    print_profiles(&store).await;
    loop {
        eprint!("> ");
        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        if let Some(arg) = line.strip_prefix("edit ") {
            match profile_at(&store, arg).await {
                Some(profile) => {
                    if let Err(e) = wizard.start_edit(&profile.id).await {
                        eprintln!("{e}");
                        continue;
                    }
                    run_wizard(&wizard, &mut lines).await?;
                }
                None => eprintln!("No profile number {arg}"),
            }
            continue;
        }
        if let Some(arg) = line.strip_prefix("delete ") {
            delete_profile(&store, arg, &mut lines).await?;
            continue;
        }

        match line.as_str() {
            "quit" | "q" | "exit" => break,
            "list" | "ls" => print_profiles(&store).await,
            "new" | "n" => {
                wizard.start_create().await;
                run_wizard(&wizard, &mut lines).await?;
            }
            _ => eprintln!("Unknown command: {line}"),
        }
    }

    eprintln!("Bye!");
    Ok(())
}

/// One full pass through the wizard, until it is submitted or cancelled.
async fn run_wizard(wizard: &WizardManager, lines: &mut StdinLines) -> anyhow::Result<()> {
    loop {
        let step = wizard.step().await;
        let draft = wizard.draft().await;
        eprintln!(
            "\n── Step {} of {}: {} ──",
            step.step_number(),
            WizardStep::TOTAL_STEPS,
            step.title()
        );

        match step {
            WizardStep::BasicInfo | WizardStep::Address => {
                eprintln!("(enter keeps the shown value, /b back, /c cancel)");
                let mut fields = DraftProfile::default();
                let prompts = if step == WizardStep::BasicInfo {
                    [
                        ("Full name", draft.full_name.as_deref(), &mut fields.full_name),
                        ("Email", draft.email.as_deref(), &mut fields.email),
                        ("Age", draft.age.as_deref(), &mut fields.age),
                    ]
                } else {
                    [
                        ("City", draft.city.as_deref(), &mut fields.city),
                        ("State", draft.state.as_deref(), &mut fields.state),
                        ("Country", draft.country.as_deref(), &mut fields.country),
                    ]
                };
                let flow = collect_fields(lines, prompts).await?;

                match flow {
                    Flow::Continue => {
                        if let Err(errors) = wizard.next(fields).await {
                            print_errors(&errors);
                        }
                    }
                    Flow::Back => {
                        // Typed values ride along even when backing out.
                        wizard.back(fields).await;
                    }
                    Flow::Cancel => {
                        wizard.cancel().await;
                        eprintln!("Wizard cancelled.");
                        return Ok(());
                    }
                }
            }
            WizardStep::Summary => {
                print_summary(&draft, wizard.is_editing().await);
                eprint!("Save? [y = save, e = edit details, c = cancel]: ");
                let Some(line) = lines.next_line().await? else {
                    wizard.cancel().await;
                    return Ok(());
                };
                match line.trim() {
                    "y" | "yes" => match wizard.submit().await {
                        Ok(saved) => {
                            match saved.outcome {
                                SaveOutcome::Created => {
                                    eprintln!("✅ Profile created successfully!")
                                }
                                SaveOutcome::Updated => {
                                    eprintln!("✅ Profile updated successfully!")
                                }
                            }
                            return Ok(());
                        }
                        Err(e) => eprintln!("❌ Save failed: {e}"),
                    },
                    "e" | "edit" => {
                        wizard.edit_details().await;
                    }
                    _ => {
                        wizard.cancel().await;
                        eprintln!("Wizard cancelled.");
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Prompt for each listed field in order, writing answers into the
/// targets. Stops early on back or cancel.
async fn collect_fields(
    lines: &mut StdinLines,
    prompts: [(&str, Option<&str>, &mut Option<String>); 3],
) -> anyhow::Result<Flow> {
    let mut flow = Flow::Continue;
    for (label, current, target) in prompts {
        flow = read_field(lines, label, current, target).await?;
        if flow != Flow::Continue {
            break;
        }
    }
    Ok(flow)
}

/// Prompt for one field. Empty input keeps the current value.
async fn read_field(
    lines: &mut StdinLines,
    label: &str,
    current: Option<&str>,
    target: &mut Option<String>,
) -> anyhow::Result<Flow> {
    match current {
        Some(value) if !value.is_empty() => eprint!("{label} [{value}]: "),
        _ => eprint!("{label}: "),
    }
    let Some(line) = lines.next_line().await? else {
        return Ok(Flow::Cancel); // EOF
    };
    Ok(match line.trim() {
        "/b" | "/back" => Flow::Back,
        "/c" | "/cancel" => Flow::Cancel,
        "" => Flow::Continue,
        value => {
            *target = Some(value.to_string());
            Flow::Continue
        }
    })
}

/// Resolve a 1-based list position typed by the user.
async fn profile_at(store: &ProfileStore, arg: &str) -> Option<Profile> {
    let position: usize = arg.trim().parse().ok()?;
    store.list().await.into_iter().nth(position.checked_sub(1)?)
}

async fn print_profiles(store: &ProfileStore) {
    let profiles = store.list().await;
    if profiles.is_empty() {
        eprintln!("No profiles yet. Type 'new' to create your first profile.");
        return;
    }
    for (i, p) in profiles.iter().enumerate() {
        eprintln!(
            "{}. {} <{}> - {}, {}, {} (age {})",
            i + 1,
            p.full_name,
            p.email,
            p.city,
            p.state,
            p.country,
            p.age
        );
    }
}

async fn delete_profile(
    store: &ProfileStore,
    arg: &str,
    lines: &mut StdinLines,
) -> anyhow::Result<()> {
    let Some(profile) = profile_at(store, arg).await else {
        eprintln!("No profile number {arg}");
        return Ok(());
    };

    eprint!("Delete {}? [y/N]: ", profile.full_name);
    let confirmed = matches!(
        lines.next_line().await?.as_deref().map(str::trim),
        Some("y") | Some("Y") | Some("yes")
    );
    if !confirmed {
        eprintln!("Kept.");
        return Ok(());
    }

    match store.delete(&profile.id).await {
        Ok(true) => eprintln!("✅ Profile deleted"),
        Ok(false) => eprintln!("Profile was already gone"),
        Err(e) => eprintln!("❌ Delete failed: {e}"),
    }
    Ok(())
}

fn print_summary(draft: &DraftProfile, editing: bool) {
    let mode = if editing { " (editing)" } else { "" };
    eprintln!("Profile to save{mode}:");
    let rows = [
        ("Full name", draft.full_name.as_deref()),
        ("Email", draft.email.as_deref()),
        ("Age", draft.age.as_deref()),
        ("City", draft.city.as_deref()),
        ("State", draft.state.as_deref()),
        ("Country", draft.country.as_deref()),
    ];
    for (label, value) in rows {
        eprintln!("  {label}: {}", value.unwrap_or("-"));
    }
    if let Some(avatar) = draft.avatar.as_deref() {
        if !avatar.is_empty() {
            eprintln!("  Avatar: {avatar}");
        }
    }
}

fn print_errors(errors: &ValidationErrors) {
    eprintln!("❌ Please fix:");
    for (field, message) in errors.iter() {
        eprintln!("  {field}: {message}");
    }
}
