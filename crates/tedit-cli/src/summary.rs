//! Tables printed after a command finishes.

use std::path::{Path, PathBuf};

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use tedit_core::{NullRenderer, SessionController};
use tedit_world::WorldDocument;

/// What `tedit info` reports about a world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldSummary {
    pub title: String,
    pub file: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    pub spawn: (i32, i32),
    pub ground_level: u32,
    pub rock_level: u32,
    pub active_tiles: usize,
    pub points: Vec<String>,
    pub last_saved: Option<String>,
    pub dirty: bool,
}

impl WorldSummary {
    pub fn from_session(session: &SessionController<NullRenderer>) -> Option<Self> {
        let world = session.world()?;
        Some(Self {
            file: session.current_file().map(Path::to_path_buf),
            points: session.points().to_vec(),
            dirty: session.is_dirty(),
            ..Self::from_world(world)
        })
    }

    fn from_world(world: &WorldDocument) -> Self {
        Self {
            title: world.title.clone(),
            file: None,
            width: world.width(),
            height: world.height(),
            spawn: (world.spawn.x, world.spawn.y),
            ground_level: world.ground_level,
            rock_level: world.rock_level,
            active_tiles: world.tiles.iter().filter(|t| t.is_active).count(),
            points: Vec::new(),
            last_saved: world
                .last_saved_at()
                .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
            dirty: false,
        }
    }
}

pub fn print_world_summary(summary: &WorldSummary) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Property"), header_cell("Value")]);
    apply_table_style(&mut table);

    table.add_row(vec![label_cell("Title"), Cell::new(&summary.title)]);
    if let Some(file) = &summary.file {
        table.add_row(vec![label_cell("File"), Cell::new(file.display())]);
    }
    table.add_row(vec![
        label_cell("Size"),
        Cell::new(format!("{} x {} tiles", summary.width, summary.height)),
    ]);
    table.add_row(vec![
        label_cell("Spawn"),
        Cell::new(format!("{}, {}", summary.spawn.0, summary.spawn.1)),
    ]);
    table.add_row(vec![label_cell("Ground level"), Cell::new(summary.ground_level)]);
    table.add_row(vec![label_cell("Rock level"), Cell::new(summary.rock_level)]);
    table.add_row(vec![label_cell("Active tiles"), Cell::new(summary.active_tiles)]);
    table.add_row(vec![
        label_cell("Points"),
        Cell::new(summary.points.join(", ")),
    ]);
    table.add_row(vec![
        label_cell("Last saved"),
        match &summary.last_saved {
            Some(at) => Cell::new(at),
            None => dim_cell("never"),
        },
    ]);
    if summary.dirty {
        table.add_row(vec![
            label_cell("Unsaved changes"),
            Cell::new("yes").fg(Color::Yellow),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Left);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}
