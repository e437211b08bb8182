pub mod runner;
pub mod fetch;
pub mod raster;
pub mod dom;

pub use orrery_engine;
pub use runner::GameRunner;

/// Element id of the info panel that `UiCommand::SetPanel` writes into.
pub const PANEL_ID: &str = "info-panel";

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` and `flush_ui()` helpers
/// - wasm-bindgen exports (game_init, game_tick, input handlers, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyGame;
///
/// orrery_web::export_game!(MyGame, "my-game");
/// ```
///
/// The calling crate must depend on `wasm-bindgen`, `log`, `console_log` and
/// `console_error_panic_hook`.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;
        use $crate::orrery_engine::InputEvent;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        /// Apply pending DOM commands once the runner borrow is released,
        /// since `alert` blocks and handlers may re-enter.
        fn flush_ui() {
            let ui = with_runner(|r| r.take_ui());
            $crate::dom::apply_ui(&ui, $crate::PANEL_ID);
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            flush_ui();
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
            flush_ui();
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_wheel(delta_y: f32) {
            with_runner(|r| r.push_input(InputEvent::Wheel { delta_y }));
        }

        #[wasm_bindgen]
        pub fn game_resize(width: f32, height: f32) {
            with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Frame data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr())
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> *const f32 {
            with_runner(|r| r.camera_ptr())
        }

        #[wasm_bindgen]
        pub fn get_lights_ptr() -> *const f32 {
            with_runner(|r| r.lights_ptr())
        }

        #[wasm_bindgen]
        pub fn get_light_count() -> u32 {
            with_runner(|r| r.light_count())
        }

        #[wasm_bindgen]
        pub fn get_meshes_ptr() -> *const f32 {
            with_runner(|r| r.meshes_ptr())
        }

        #[wasm_bindgen]
        pub fn get_mesh_count() -> u32 {
            with_runner(|r| r.mesh_count())
        }

        #[wasm_bindgen]
        pub fn get_transparent_start() -> u32 {
            with_runner(|r| r.transparent_start())
        }

        #[wasm_bindgen]
        pub fn get_labels_ptr() -> *const f32 {
            with_runner(|r| r.labels_ptr())
        }

        #[wasm_bindgen]
        pub fn get_label_count() -> u32 {
            with_runner(|r| r.label_count())
        }

        // ---- Geometry accessors ----

        #[wasm_bindgen]
        pub fn get_geometry_count() -> u32 {
            with_runner(|r| r.geometry_count())
        }

        #[wasm_bindgen]
        pub fn get_geometry_vertex_count(id: u32) -> u32 {
            with_runner(|r| r.geometry_vertex_count(id))
        }

        #[wasm_bindgen]
        pub fn get_geometry_positions_ptr(id: u32) -> *const f32 {
            with_runner(|r| r.geometry_positions_ptr(id))
        }

        #[wasm_bindgen]
        pub fn get_geometry_normals_ptr(id: u32) -> *const f32 {
            with_runner(|r| r.geometry_normals_ptr(id))
        }

        #[wasm_bindgen]
        pub fn get_geometry_uvs_ptr(id: u32) -> *const f32 {
            with_runner(|r| r.geometry_uvs_ptr(id))
        }

        #[wasm_bindgen]
        pub fn get_geometry_indices_ptr(id: u32) -> *const u32 {
            with_runner(|r| r.geometry_indices_ptr(id))
        }

        #[wasm_bindgen]
        pub fn get_geometry_index_count(id: u32) -> u32 {
            with_runner(|r| r.geometry_index_count(id))
        }

        // ---- Label bitmap accessors ----

        #[wasm_bindgen]
        pub fn get_label_texture_count() -> u32 {
            with_runner(|r| r.label_texture_count())
        }

        #[wasm_bindgen]
        pub fn get_label_bitmap_ptr(id: u32) -> *const u8 {
            with_runner(|r| r.label_bitmap_ptr(id))
        }

        #[wasm_bindgen]
        pub fn get_label_bitmap_width(id: u32) -> u32 {
            with_runner(|r| r.label_bitmap_width(id))
        }

        #[wasm_bindgen]
        pub fn get_label_bitmap_height(id: u32) -> u32 {
            with_runner(|r| r.label_bitmap_height(id))
        }

        #[wasm_bindgen]
        pub fn get_manifest_json() -> String {
            with_runner(|r| r.manifest_json())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_meshes() -> u32 {
            with_runner(|r| r.max_meshes())
        }

        #[wasm_bindgen]
        pub fn get_max_labels() -> u32 {
            with_runner(|r| r.max_labels())
        }

        #[wasm_bindgen]
        pub fn get_max_lights() -> u32 {
            with_runner(|r| r.max_lights())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }

        #[wasm_bindgen]
        pub fn get_viewport_width() -> f32 {
            with_runner(|r| r.viewport_width())
        }

        #[wasm_bindgen]
        pub fn get_viewport_height() -> f32 {
            with_runner(|r| r.viewport_height())
        }
    };
}
