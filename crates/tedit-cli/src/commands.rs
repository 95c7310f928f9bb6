use anyhow::{Result, bail};
use tedit_cli::summary::{WorldSummary, print_world_summary};
use tedit_cli::workflow::Workflow;
use tedit_core::EditorSettings;
use tedit_updater::{VersionStatus, check_version};
use tedit_world::NewWorldSpec;
use tracing::{info, warn};

use crate::cli::{CheckUpdatesArgs, InfoArgs, NewArgs, PaintArgs, ResaveArgs};

pub async fn run_new(args: &NewArgs, settings: &EditorSettings, progress: bool) -> Result<()> {
    let spec = NewWorldSpec {
        title: args.title.clone(),
        width: args.width,
        height: args.height,
        ground_level: args.ground_level,
        rock_level: args.rock_level,
        spawn_offset: args.spawn_offset,
        underworld_depth: args.underworld_depth,
    };

    let mut workflow = Workflow::new(settings, progress);
    workflow.generate(spec).await?;
    let path = workflow.save(Some(args.output.clone()), args.force).await?;
    println!("Created {}", path.display());
    Ok(())
}

pub async fn run_info(args: &InfoArgs, settings: &EditorSettings, progress: bool) -> Result<()> {
    let mut workflow = Workflow::new(settings, progress);
    workflow.open(&args.world).await?;
    match WorldSummary::from_session(workflow.editor().session()) {
        Some(summary) => {
            print_world_summary(&summary);
            Ok(())
        }
        None => bail!("{} did not produce a world", args.world.display()),
    }
}

pub async fn run_resave(args: &ResaveArgs, settings: &EditorSettings, progress: bool) -> Result<()> {
    let mut workflow = Workflow::new(settings, progress);
    workflow.open(&args.world).await?;
    let path = workflow.save(args.output.clone(), args.force).await?;
    println!("Saved {}", path.display());
    Ok(())
}

pub async fn run_paint(args: &PaintArgs, settings: &EditorSettings, progress: bool) -> Result<()> {
    let mut workflow = Workflow::new(settings, progress);
    workflow.open(&args.world).await?;

    workflow.editor_mut().update_paint(|paint| {
        paint.set_paint_mode(args.mode.into());
        if let Some(tile) = args.tile {
            paint.set_tile(tile);
        }
        if let Some(wall) = args.wall {
            paint.set_wall(wall);
        }
        paint.set_eraser(args.erase);
    });

    let changed = workflow.pencil(&args.at)?;
    if changed == 0 {
        println!("Nothing to paint; {} left untouched", args.world.display());
        return Ok(());
    }
    info!("Painted {changed} of {} points", args.at.len());

    let path = workflow.save(args.output.clone(), args.force).await?;
    println!("Painted {changed} tile(s) into {}", path.display());
    Ok(())
}

pub async fn run_check_updates(args: &CheckUpdatesArgs, settings: &EditorSettings) -> Result<()> {
    let url = args.url.as_deref().unwrap_or(&settings.updates.url);
    let status = check_version(url).await;
    println!("{}", status.message());
    if status == VersionStatus::Unknown {
        bail!("could not reach {url}");
    }
    Ok(())
}

/// Version check run before other commands when enabled in the settings.
///
/// Only an available update is reported; failures are logged.
pub async fn startup_version_check(settings: &EditorSettings) {
    match check_version(&settings.updates.url).await {
        status @ VersionStatus::UpdateAvailable(_) => eprintln!("{}", status.message()),
        VersionStatus::Unknown => warn!("Startup version check failed"),
        VersionStatus::UpToDate => {}
    }
}
