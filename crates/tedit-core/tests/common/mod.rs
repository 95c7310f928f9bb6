//! Shared fixtures for session integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use tedit_core::{AutosaveSettings, Completion, Editor, EditorSettings, NullRenderer, Renderer};
use tedit_world::{
    BinaryWorldCodec, CodecError, NewWorldSpec, Npc, Progress, TilePoint, WorldCodec,
    WorldDocument,
};

/// Codec that blocks every load and save until the gate is opened.
///
/// Lets tests hold the session in its busy phase for as long as they like.
#[derive(Default)]
pub struct GateCodec {
    open: Mutex<bool>,
    signal: Condvar,
    pub loads: AtomicUsize,
    pub saves: AtomicUsize,
}

impl GateCodec {
    pub fn closed() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn opened() -> Arc<Self> {
        let codec = Self::default();
        *codec.open.lock().unwrap() = true;
        Arc::new(codec)
    }

    pub fn open(&self) {
        *self.open.lock().unwrap() = true;
        self.signal.notify_all();
    }

    pub fn close(&self) {
        *self.open.lock().unwrap() = false;
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn wait(&self) {
        let mut open = self.open.lock().unwrap();
        while !*open {
            open = self.signal.wait(open).unwrap();
        }
    }
}

impl WorldCodec for GateCodec {
    fn load(&self, path: &Path, progress: &dyn Fn(Progress)) -> Result<WorldDocument, CodecError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.wait();
        BinaryWorldCodec.load(path, progress)
    }

    fn save(
        &self,
        world: &WorldDocument,
        path: &Path,
        progress: &dyn Fn(Progress),
    ) -> Result<(), CodecError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.wait();
        BinaryWorldCodec.save(world, path, progress)
    }
}

/// How often each [`CountingRenderer`] method ran.
#[derive(Debug, Clone, Default)]
pub struct RenderCounts {
    pixel_maps: Arc<AtomicUsize>,
    minimaps: Arc<AtomicUsize>,
    minimap_updates: Arc<AtomicUsize>,
}

impl RenderCounts {
    pub fn pixel_maps(&self) -> usize {
        self.pixel_maps.load(Ordering::SeqCst)
    }

    pub fn minimaps(&self) -> usize {
        self.minimaps.load(Ordering::SeqCst)
    }

    pub fn minimap_updates(&self) -> usize {
        self.minimap_updates.load(Ordering::SeqCst)
    }
}

/// Renderer that records its calls. The minimap is the number of in-place
/// refreshes applied to it.
#[derive(Debug, Clone, Default)]
pub struct CountingRenderer {
    pub counts: RenderCounts,
}

impl Renderer for CountingRenderer {
    type PixelMap = (u32, u32);
    type Minimap = u32;

    fn render_full_pixel_map(&self, world: &WorldDocument) -> (u32, u32) {
        self.counts.pixel_maps.fetch_add(1, Ordering::SeqCst);
        (world.width(), world.height())
    }

    fn render_minimap(&self, _world: &WorldDocument) -> u32 {
        self.counts.minimaps.fetch_add(1, Ordering::SeqCst);
        0
    }

    fn update_minimap(&self, _world: &WorldDocument, minimap: &mut u32) {
        self.counts.minimap_updates.fetch_add(1, Ordering::SeqCst);
        *minimap += 1;
    }
}

/// Settings that keep autosaves inside `dir`.
pub fn test_settings(dir: &Path) -> EditorSettings {
    EditorSettings {
        temp_dir: Some(dir.join("temp")),
        autosave: AutosaveSettings::default(),
        ..EditorSettings::default()
    }
}

pub fn editor_with(codec: Arc<GateCodec>, dir: &Path) -> Editor<NullRenderer> {
    editor_with_renderer(codec, dir, NullRenderer)
}

pub fn editor_with_renderer<R: Renderer>(
    codec: Arc<GateCodec>,
    dir: &Path,
    renderer: R,
) -> Editor<R> {
    Editor::new(
        &test_settings(dir),
        codec,
        renderer,
        tokio::runtime::Handle::current(),
    )
}

/// The 10x10 world used throughout the tests.
pub fn small_spec() -> NewWorldSpec {
    NewWorldSpec {
        title: "Small".to_string(),
        width: 10,
        height: 10,
        ground_level: 5,
        rock_level: 8,
        spawn_offset: 1,
        underworld_depth: 1,
    }
}

/// Write a small world with two NPCs to `dir/name` and return its path.
pub fn write_world(dir: &Path, name: &str) -> PathBuf {
    let mut world = WorldDocument::new("Fixture", 8, 6);
    world.npcs.push(Npc::new("Guide", TilePoint::new(2, 2)));
    world.npcs.push(Npc::new("Nurse", TilePoint::new(5, 2)));

    let path = dir.join(name);
    BinaryWorldCodec.save(&world, &path, &|_| {}).unwrap();
    path
}

/// Wait for the next user-visible completion, failing the test after five
/// seconds.
pub async fn next_completion<R: Renderer>(editor: &mut Editor<R>) -> Completion {
    tokio::time::timeout(Duration::from_secs(5), editor.next_completion())
        .await
        .expect("timed out waiting for completion")
        .expect("completion channel closed")
}

/// Pump messages until the session is idle.
pub async fn settle<R: Renderer>(editor: &mut Editor<R>) {
    for _ in 0..500 {
        editor.pump();
        if !editor.session().is_busy() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("session never became idle");
}
