/*!
 * Desktop viewer for the Explore Islands region map
 *
 * A cross-platform window providing:
 * - Outline / colour fill modes and political / cultural / geographic overlays
 * - Hover highlight with a sticky tooltip, click (or double tap) to open a region page
 * - One-click framing of a province or region group
 * - Loading from the backend or from a local data folder
 *
 * Platform support: Windows, macOS, Linux
 */

use clap::Parser;
use eframe::egui;
use explore_islands::geometry::{Bounds, LonLat, Padding, RegionBoundary};
use explore_islands::source::{self, LoadedData};
use explore_islands::style::{FillMode, OverlayCategory, Rgba, StyleSpec, Tooltip};
use explore_islands::surface::{BaseLayer, MapSurface, ViewSpec};
use explore_islands::viewport::Viewport;
use explore_islands::{LoadError, MapConfig, PointerKind, RegionMapController};
use geo::TriangulateEarcut;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "islands-gui", version, about = "Explore Islands map viewer")]
struct GuiArgs {
    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Backend base URL.
    #[arg(long, env = "ISLANDS_BASE_URL")]
    base_url: Option<String>,
    /// Load from a local data folder instead of the backend.
    #[arg(long, env = "ISLANDS_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<(), eframe::Error> {
    // Enable logging for better debugging
    env_logger::init();

    let args = GuiArgs::parse();
    let mut config = match MapConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err:#}; falling back to defaults");
            MapConfig::default()
        }
    };
    if let Some(url) = args.base_url {
        config.base_url = url;
    }
    if let Some(dir) = args.data_dir {
        config.data_dir = Some(dir);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 760.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("Explore Islands"),
        ..Default::default()
    };

    eframe::run_native(
        "Explore Islands",
        options,
        Box::new(|_cc| Ok(Box::new(IslandsApp::new(config)))),
    )
}

/// One region layer as the window draws it.
struct Layer {
    boundary: RegionBoundary,
    /// Earcut triangles of the fill, in lon/lat.
    triangles: Vec<[LonLat; 3]>,
    style: StyleSpec,
}

/// egui-backed map surface.
struct EguiSurface {
    viewport: Viewport,
    layers: Vec<Layer>,
    attached: bool,
    tooltip: Option<(String, Tooltip)>,
    pending_fit: Option<(Bounds, Padding)>,
    pending_url: Option<String>,
}

impl EguiSurface {
    fn new() -> Self {
        Self {
            viewport: Viewport::new(&ViewSpec::default(), BaseLayer::default().max_zoom as f64),
            layers: Vec::new(),
            attached: false,
            tooltip: None,
            pending_fit: None,
            pending_url: None,
        }
    }

    fn to_pos(&self, p: LonLat, rect: egui::Rect) -> egui::Pos2 {
        let s = self
            .viewport
            .to_screen(p, [rect.width() as f64, rect.height() as f64]);
        egui::pos2(rect.left() + s[0] as f32, rect.top() + s[1] as f32)
    }

    fn to_lonlat(&self, pos: egui::Pos2, rect: egui::Rect) -> LonLat {
        self.viewport.to_lonlat(
            [(pos.x - rect.left()) as f64, (pos.y - rect.top()) as f64],
            [rect.width() as f64, rect.height() as f64],
        )
    }

    /// Camera moves wait for a frame because they need the canvas size.
    fn apply_pending_fit(&mut self, rect: egui::Rect) {
        if let Some((bounds, padding)) = self.pending_fit.take() {
            self.viewport.fit(
                &bounds,
                padding,
                [rect.width() as f64, rect.height() as f64],
            );
        }
    }

    fn paint(&self, painter: &egui::Painter, rect: egui::Rect) {
        // Flat dark basemap; raster tiles are left to a tile-capable surface.
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(20, 22, 28));
        if !self.attached {
            return;
        }
        for layer in &self.layers {
            let fill = color32(&layer.style.fill_color, layer.style.fill_opacity);
            if fill.a() > 0 {
                let mut mesh = egui::epaint::Mesh::default();
                for tri in &layer.triangles {
                    let base = mesh.vertices.len() as u32;
                    for p in tri {
                        mesh.colored_vertex(self.to_pos(*p, rect), fill);
                    }
                    mesh.add_triangle(base, base + 1, base + 2);
                }
                painter.add(egui::Shape::mesh(mesh));
            }

            let stroke_colour = color32(&layer.style.color, layer.style.opacity);
            if stroke_colour.a() == 0 || layer.style.weight <= 0.0 {
                continue;
            }
            let stroke = egui::Stroke::new(layer.style.weight, stroke_colour);
            for poly in &layer.boundary.shape.0 {
                for ring in std::iter::once(poly.exterior()).chain(poly.interiors()) {
                    let points: Vec<egui::Pos2> = ring
                        .coords()
                        .map(|c| self.to_pos(LonLat::new(c.x, c.y), rect))
                        .collect();
                    painter.add(egui::Shape::closed_line(points, stroke));
                }
            }
        }
    }
}

fn color32(css: &str, opacity: f32) -> egui::Color32 {
    let c = Rgba::parse(css).unwrap_or(Rgba::WHITE).with_opacity(opacity);
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

impl MapSurface for EguiSurface {
    fn set_view(&mut self, view: &ViewSpec) {
        self.viewport = Viewport::new(view, self.viewport.max_zoom);
    }

    fn add_base_layer(&mut self, layer: &BaseLayer) {
        log::debug!("base layer {}", layer.url_template);
        self.viewport.set_max_zoom(layer.max_zoom as f64);
    }

    fn add_region(&mut self, boundary: &RegionBoundary) {
        let triangles = boundary
            .shape
            .0
            .iter()
            .flat_map(|poly| poly.earcut_triangles())
            .map(|t| {
                [
                    LonLat::new(t.0.x, t.0.y),
                    LonLat::new(t.1.x, t.1.y),
                    LonLat::new(t.2.x, t.2.y),
                ]
            })
            .collect();
        self.layers.push(Layer {
            boundary: boundary.clone(),
            triangles,
            style: StyleSpec::default(),
        });
    }

    fn clear_regions(&mut self) {
        self.layers.clear();
        self.tooltip = None;
    }

    fn attach_regions(&mut self) {
        self.attached = true;
    }

    fn detach_regions(&mut self) {
        self.attached = false;
        self.tooltip = None;
    }

    fn regions_attached(&self) -> bool {
        self.attached
    }

    fn apply_style(&mut self, slug: &str, style: &StyleSpec) {
        if let Some(layer) = self.layers.iter_mut().find(|l| l.boundary.slug == slug) {
            layer.style = style.clone();
        }
    }

    fn open_tooltip(&mut self, slug: &str, tooltip: &Tooltip) {
        self.tooltip = Some((slug.to_owned(), tooltip.clone()));
    }

    fn close_tooltip(&mut self, slug: &str) {
        if self.tooltip.as_ref().is_some_and(|(s, _)| s == slug) {
            self.tooltip = None;
        }
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding: Padding) {
        self.pending_fit = Some((bounds, padding));
    }

    fn navigate(&mut self, url: &str) {
        self.pending_url = Some(url.to_owned());
    }
}

/// Main application state
struct IslandsApp {
    controller: RegionMapController<EguiSurface>,
    config: MapConfig,

    // Pointer state
    hovered: Option<String>,
    touch_input: bool,

    // Background load
    is_loading: bool,
    load_receiver: Option<mpsc::Receiver<Result<LoadedData, LoadError>>>,
}

impl IslandsApp {
    fn new(config: MapConfig) -> Self {
        let controller = RegionMapController::new(EguiSurface::new(), config.clone());
        let mut app = Self {
            controller,
            config,
            hovered: None,
            touch_input: false,
            is_loading: false,
            load_receiver: None,
        };
        app.start_load(None);
        app
    }

    /// Fetch everything on a background thread; `data_dir` overrides the config.
    fn start_load(&mut self, data_dir: Option<PathBuf>) {
        let mut config = self.config.clone();
        if data_dir.is_some() {
            config.data_dir = data_dir;
        }

        self.is_loading = true;
        let (sender, receiver) = mpsc::channel();
        self.load_receiver = Some(receiver);

        thread::spawn(move || {
            let result = source::load_from_config(&config);
            let _ = sender.send(result);
        });
    }

    fn check_load_result(&mut self) {
        if let Some(receiver) = &self.load_receiver
            && let Ok(result) = receiver.try_recv()
        {
            self.is_loading = false;
            self.load_receiver = None;
            self.hovered = None;

            match result {
                Ok(data) => self.controller.load(data),
                Err(err) => {
                    // The map stays empty; there is no retry.
                    log::error!("{:#}", anyhow::Error::new(err).context("load region data"));
                }
            }
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.label("Mode:");
            for mode in FillMode::ALL {
                let label = match mode {
                    FillMode::Outline => "Outline",
                    FillMode::Colours => "Colours",
                };
                if ui
                    .selectable_label(self.controller.is_active_mode(mode), label)
                    .clicked()
                {
                    self.controller.set_fill_mode(mode);
                }
            }

            ui.separator();
            ui.label("Overlay:");
            for overlay in OverlayCategory::ALL {
                let label = match overlay {
                    OverlayCategory::Political => "Political",
                    OverlayCategory::Cultural => "Cultural",
                    OverlayCategory::Geographic => "Geographic",
                };
                if ui
                    .selectable_label(self.controller.is_active_overlay(overlay), label)
                    .clicked()
                {
                    self.controller.set_overlay(overlay);
                    self.hovered = None;
                }
            }

            ui.separator();
            for group in self.controller.groups() {
                if ui.button(group.as_str()).clicked() {
                    self.controller.focus_group(&group);
                }
            }

            ui.separator();
            if ui
                .add_enabled(!self.is_loading, egui::Button::new("Reload"))
                .clicked()
            {
                self.start_load(None);
            }
            if ui
                .add_enabled(!self.is_loading, egui::Button::new("Open data folder…"))
                .clicked()
                && let Some(dir) = rfd::FileDialog::new().pick_folder()
            {
                self.start_load(Some(dir));
            }
            if self.is_loading {
                ui.spinner();
            }
        });
    }

    fn map_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        let size = [rect.width() as f64, rect.height() as f64];

        self.controller.surface_mut().apply_pending_fit(rect);

        // Pan and zoom
        if response.dragged() {
            let d = response.drag_delta();
            self.controller
                .surface_mut()
                .viewport
                .pan_by([d.x as f64, d.y as f64]);
        }
        if let Some(pos) = response.hover_pos() {
            let (scroll, pinch) = ui.input(|i| (i.smooth_scroll_delta.y, i.zoom_delta()));
            let delta = scroll as f64 / 240.0 + (pinch as f64).log2();
            if delta != 0.0 {
                let anchor = [(pos.x - rect.left()) as f64, (pos.y - rect.top()) as f64];
                self.controller
                    .surface_mut()
                    .viewport
                    .zoom_around(delta, anchor, size);
            }
        }

        // Touch vs mouse: remember what the last pointer input came from.
        ui.input(|i| {
            if i.events.iter().any(|e| matches!(e, egui::Event::Touch { .. })) {
                self.touch_input = true;
            } else if i
                .events
                .iter()
                .any(|e| matches!(e, egui::Event::PointerMoved(_)))
            {
                self.touch_input = false;
            }
        });

        // Hover enter / leave
        let under_pointer = response.hover_pos().and_then(|pos| {
            let p = self.controller.surface().to_lonlat(pos, rect);
            self.controller.region_at(p).map(str::to_owned)
        });
        if under_pointer != self.hovered {
            if let Some(old) = self.hovered.take() {
                self.controller.pointer_leave(&old);
            }
            if let Some(new) = &under_pointer {
                self.controller.pointer_enter(new);
            }
            self.hovered = under_pointer;
        }

        // Hit-test where the press landed; hover can be gone on a touch release.
        if response.clicked()
            && let Some(pos) = response.interact_pointer_pos()
        {
            let pointer = if self.touch_input {
                PointerKind::Touch
            } else {
                PointerKind::Mouse
            };
            let p = self.controller.surface().to_lonlat(pos, rect);
            self.controller.click_at(p, pointer, Instant::now());
        }

        if let Some(path) = self.controller.surface_mut().pending_url.take() {
            let url = self.controller.config().url(&path);
            ui.ctx().open_url(egui::OpenUrl::new_tab(url));
        }

        self.controller.surface().paint(&painter, rect);

        if let Some((_, tip)) = self.controller.surface().tooltip.clone() {
            let _ = response.on_hover_ui_at_pointer(|ui| {
                ui.strong(tip.title.as_str());
                if !tip.body.is_empty() {
                    ui.label(tip.body.as_str());
                }
            });
        }
    }
}

impl eframe::App for IslandsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for a finished background load
        self.check_load_result();

        // Request repaint while loading (for spinner animation)
        if self.is_loading {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.toolbar(ui);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.map_canvas(ui);
            });
    }
}
