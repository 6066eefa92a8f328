//! Application shell: window, event wiring, and the render loop.
//!
//! Three event sources drive the backdrop, all on the event loop thread:
//! redraws advance the cube spin and render a frame, resizes re-run the
//! responsive layout synchronously, and scroll wheel events move the page
//! offset (overlay fade immediately, section spy coalesced to the next
//! frame). The redraw loop re-requests itself every frame and runs for the
//! lifetime of the window; closing the window is the only way out.

use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::event::{MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use glam::Mat4;

use crate::assets::{Assets, FontId};
use crate::cube::{
    BODY_COLOR, CUBELET_SIZE, CubePlan, SPIN_STEP, STICKER_BORDER_SIZE, STICKER_FACE_SIZE,
    spin_rotation,
};
use crate::cube_pass::{CubePass, DrawCall};
use crate::draw2d::{Color, Draw2d};
use crate::gpu::GpuContext;
use crate::mesh::{Mesh, Transform};
use crate::overlay::Overlay;
use crate::spy::{Section, SectionSpy};
use crate::viewport::ViewportController;

/// Page background behind the cube.
const BACKGROUND: wgpu::Color = wgpu::Color {
    r: 0.016,
    g: 0.016,
    b: 0.024,
    a: 1.0,
};

/// Pixels per scroll-wheel line.
const LINE_SCROLL_PX: f32 = 40.0;

/// Logical font sizes; rasterized at the UI scale once at startup.
const NAME_FONT_SIZE: f32 = 64.0;
const SUB_FONT_SIZE: f32 = 18.0;
const NAV_FONT_SIZE: f32 = 15.0;

/// Window configuration.
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Backdrop".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// The cube prop assembled for the GPU: shared meshes plus one flattened
/// instance list in group-local space. Built once; never rebuilt.
struct CubeProp {
    body: Mesh,
    border: Mesh,
    sticker: Mesh,
    parts: Vec<PartInstance>,
}

#[derive(Clone, Copy)]
enum PartMesh {
    Body,
    Border,
    Sticker,
}

struct PartInstance {
    mesh: PartMesh,
    local: Mat4,
    color: Color,
    lit: bool,
}

impl CubeProp {
    fn new(gpu: &GpuContext) -> Self {
        let plan = CubePlan::build();
        let mut parts = Vec::new();

        for cubelet in &plan.cubelets {
            parts.push(PartInstance {
                mesh: PartMesh::Body,
                local: Mat4::from_translation(cubelet.position),
                color: BODY_COLOR,
                lit: true,
            });

            for sticker in &cubelet.stickers {
                parts.push(PartInstance {
                    mesh: PartMesh::Border,
                    local: Mat4::from_rotation_translation(
                        sticker.rotation,
                        cubelet.position + sticker.border_center,
                    ),
                    color: Color::BLACK,
                    lit: false,
                });
                parts.push(PartInstance {
                    mesh: PartMesh::Sticker,
                    local: Mat4::from_rotation_translation(
                        sticker.rotation,
                        cubelet.position + sticker.face_center,
                    ),
                    color: sticker.face.color(),
                    lit: false,
                });
            }
        }

        Self {
            body: Mesh::cube(gpu, CUBELET_SIZE),
            border: Mesh::quad(gpu, STICKER_BORDER_SIZE),
            sticker: Mesh::quad(gpu, STICKER_FACE_SIZE),
            parts,
        }
    }

    fn draw_calls(&self, group: &Transform) -> Vec<DrawCall<'_>> {
        let group_matrix = group.matrix();
        self.parts
            .iter()
            .map(|part| DrawCall {
                mesh: match part.mesh {
                    PartMesh::Body => &self.body,
                    PartMesh::Border => &self.border,
                    PartMesh::Sticker => &self.sticker,
                },
                model: group_matrix * part.local,
                color: part.color,
                lit: part.lit,
            })
            .collect()
    }
}

struct FontSet {
    name: FontId,
    sub: FontId,
    nav: FontId,
}

/// Run the backdrop until the window closes.
pub fn run(config: AppConfig, overlay: Option<Overlay>, sections: Vec<Section>) {
    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = BackdropApp::Pending {
        config,
        overlay,
        sections,
    };
    event_loop.run_app(&mut app).unwrap();
}

pub enum BackdropApp {
    Pending {
        config: AppConfig,
        overlay: Option<Overlay>,
        sections: Vec<Section>,
    },
    Running {
        window: Arc<Window>,
        gpu: GpuContext,
        assets: Assets,
        fonts: Option<FontSet>,
        draw_2d: Draw2d,
        cube_pass: CubePass,
        cube: CubeProp,
        controller: ViewportController,
        overlay: Option<Overlay>,
        spy: SectionSpy,
        scroll_y: f32,
        page_height: f32,
        /// Spin accumulator in radians. Grows forever; never reset.
        spin: f32,
    },
}

impl ApplicationHandler for BackdropApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let BackdropApp::Pending {
            config,
            overlay,
            sections,
        } = self
        else {
            return;
        };

        let window_attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

        let window = Arc::new(event_loop.create_window(window_attrs).unwrap());
        let mut gpu = GpuContext::new(window.clone());

        let size = window.inner_size();
        let scale_factor = window.scale_factor();
        let mut controller = ViewportController::new(size, scale_factor);
        // Apply the density cap to the surface before the first frame.
        controller.handle_resize(&mut gpu, size, scale_factor);

        let mut assets = Assets::new();
        let ui_scale = ui_scale(&gpu, &controller);
        let fonts = match load_fonts(&mut assets, &gpu, ui_scale) {
            Ok(fonts) => Some(fonts),
            Err(e) => {
                eprintln!("[backdrop] no usable font ({}); overlay and nav text disabled", e);
                None
            }
        };

        let draw_2d = Draw2d::new(&gpu);
        let cube_pass = CubePass::new(&gpu);
        let cube = CubeProp::new(&gpu);

        let page_height = sections
            .iter()
            .map(|s| s.top + s.height)
            .fold(0.0f32, f32::max);
        let mut spy = SectionSpy::new(std::mem::take(sections));

        let mut overlay = overlay.take();
        if let Some(overlay) = overlay.as_mut() {
            overlay.update_opacity(0.0, controller.viewport().height);
        }
        spy.update(0.0, controller.viewport().height);

        window.request_redraw();

        *self = BackdropApp::Running {
            window,
            gpu,
            assets,
            fonts,
            draw_2d,
            cube_pass,
            cube,
            controller,
            overlay,
            spy,
            scroll_y: 0.0,
            page_height,
            spin: 0.0,
        };
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let BackdropApp::Running {
            window,
            gpu,
            assets,
            fonts,
            draw_2d,
            cube_pass,
            cube,
            controller,
            overlay,
            spy,
            scroll_y,
            page_height,
            spin,
        } = self
        else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                controller.handle_resize(gpu, size, window.scale_factor());
                *scroll_y = scroll_y.min(max_scroll(*page_height, controller));
                // Resize-driven spy update is immediate, not frame-coalesced.
                spy.update(*scroll_y, controller.viewport().height);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y * LINE_SCROLL_PX,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                *scroll_y = (*scroll_y - dy).clamp(0.0, max_scroll(*page_height, controller));

                if let Some(overlay) = overlay.as_mut() {
                    overlay.update_opacity(*scroll_y, controller.viewport().height);
                }
                spy.schedule();
            }
            WindowEvent::RedrawRequested => {
                // Coalesced scroll work runs at most once per frame.
                spy.run_queued(*scroll_y, controller.viewport().height);

                *spin += SPIN_STEP;
                controller.cube_transform.rotation = spin_rotation(*spin);

                cube_pass.ensure_depth_size(gpu);
                draw_2d.clear();
                draw_2d.update_font_bind_groups(gpu, assets);
                if let Some(fonts) = fonts {
                    let scale = ui_scale(gpu, controller);
                    draw_nav(draw_2d, assets, fonts, spy, gpu, scale);
                    if let Some(overlay) = overlay.as_ref() {
                        draw_overlay(draw_2d, assets, fonts, overlay, controller, gpu, scale);
                    }
                }

                let output = gpu.surface.get_current_texture().unwrap();
                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                let mut encoder = gpu
                    .device
                    .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                        label: Some("Frame Encoder"),
                    });

                {
                    let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("Cube Pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(BACKGROUND),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        })],
                        depth_stencil_attachment: Some(
                            wgpu::RenderPassDepthStencilAttachment {
                                view: cube_pass.depth_view(),
                                depth_ops: Some(wgpu::Operations {
                                    load: wgpu::LoadOp::Clear(1.0),
                                    store: wgpu::StoreOp::Store,
                                }),
                                stencil_ops: None,
                            },
                        ),
                        timestamp_writes: None,
                        occlusion_query_set: None,
                    });

                    let draw_calls = cube.draw_calls(&controller.cube_transform);
                    cube_pass.render(gpu, &mut pass, &controller.camera, &draw_calls);
                }

                {
                    let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("Overlay Pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Load,
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        })],
                        depth_stencil_attachment: None,
                        timestamp_writes: None,
                        occlusion_query_set: None,
                    });

                    draw_2d.render(gpu, &mut pass);
                }

                gpu.queue.submit(std::iter::once(encoder.finish()));
                output.present();

                window.request_redraw();
            }
            _ => {}
        }
    }
}

fn max_scroll(page_height: f32, controller: &ViewportController) -> f32 {
    (page_height - controller.viewport().height).max(0.0)
}

/// Render pixels per device-independent pixel. Equal to the capped pixel
/// ratio, so it only moves when the window changes monitors.
fn ui_scale(gpu: &GpuContext, controller: &ViewportController) -> f32 {
    let logical = controller.viewport().width;
    if logical > 0.0 {
        gpu.width() as f32 / logical
    } else {
        1.0
    }
}

fn load_fonts(
    assets: &mut Assets,
    gpu: &GpuContext,
    ui_scale: f32,
) -> Result<FontSet, crate::assets::FontError> {
    Ok(FontSet {
        name: assets.load_system_font(gpu, NAME_FONT_SIZE * ui_scale)?,
        sub: assets.load_system_font(gpu, SUB_FONT_SIZE * ui_scale)?,
        nav: assets.load_system_font(gpu, NAV_FONT_SIZE * ui_scale)?,
    })
}

const NAV_TOP_PX: f32 = 22.0;
const NAV_SPACING_PX: f32 = 30.0;
const NAV_ACTIVE: Color = Color::WHITE;
const NAV_INACTIVE: Color = Color::rgba(0.62, 0.64, 0.68, 1.0);

/// Top nav bar: one centered link per section, active link underlined.
fn draw_nav(
    draw_2d: &mut Draw2d,
    assets: &Assets,
    fonts: &FontSet,
    spy: &SectionSpy,
    gpu: &GpuContext,
    scale: f32,
) {
    if spy.sections().is_empty() {
        return;
    }
    let Some(font) = assets.font(fonts.nav) else {
        return;
    };

    let spacing = NAV_SPACING_PX * scale;
    let total: f32 = spy
        .sections()
        .iter()
        .map(|s| font.measure(&s.id))
        .sum::<f32>()
        + spacing * (spy.sections().len() - 1) as f32;

    let mut x = (gpu.width() as f32 - total) / 2.0;
    let y = NAV_TOP_PX * scale;

    for (i, section) in spy.sections().iter().enumerate() {
        let active = spy.active() == Some(i);
        let color = if active { NAV_ACTIVE } else { NAV_INACTIVE };
        draw_2d.text(assets, fonts.nav, x, y, &section.id, color);

        let width = font.measure(&section.id);
        if active {
            draw_2d.rect(x, y + font.line_height() + 2.0 * scale, width, 2.0 * scale, color);
        }
        x += width + spacing;
    }
}

/// Anchor fractions matching the page stylesheet: 8vh from the top in
/// portrait, 6vw from the left in landscape.
const OVERLAY_TOP_VH: f32 = 0.08;
const OVERLAY_LEFT_VW: f32 = 0.06;
/// CSS root font size, for rem-denominated spacing.
const REM_PX: f32 = 16.0;

const SUB_COLOR: Color = Color::rgba(0.78, 0.80, 0.84, 1.0);

/// Name overlay: two name lines plus the spaced sub label, placed by the
/// current layout and faded by the current scroll opacity.
fn draw_overlay(
    draw_2d: &mut Draw2d,
    assets: &Assets,
    fonts: &FontSet,
    overlay: &Overlay,
    controller: &ViewportController,
    gpu: &GpuContext,
    scale: f32,
) {
    if overlay.opacity <= 0.0 {
        return;
    }
    let (Some(name_font), Some(sub_font)) = (assets.font(fonts.name), assets.font(fonts.sub))
    else {
        return;
    };

    let placement = controller.overlay_placement();
    let w = gpu.width() as f32;
    let h = gpu.height() as f32;

    let name_color = Color::WHITE.with_alpha(overlay.opacity);
    let sub_color = SUB_COLOR.with_alpha(overlay.opacity);

    let letter_spacing = placement.sub_letter_spacing_em * sub_font.size();
    let sub_pad = placement.sub_padding_left_em * sub_font.size();
    let margin_top = placement.sub_margin_top_rem * REM_PX * scale;

    let name_line = name_font.line_height();
    let sub_line = sub_font.line_height();

    use crate::layout::{OverlayAnchor, TextAlign};

    let block_height = 2.0 * name_line + margin_top + sub_line;
    let (block_left, block_top) = match placement.anchor {
        OverlayAnchor::TopCenter => (0.0, OVERLAY_TOP_VH * h),
        OverlayAnchor::CenterLeft => (OVERLAY_LEFT_VW * w, h / 2.0 - block_height / 2.0),
    };

    let line_x = |text: &str, font: &crate::assets::FontAtlas, spacing: f32, pad: f32| {
        match placement.text_align {
            TextAlign::Center => (w - font.measure_spaced(text, spacing)) / 2.0,
            TextAlign::Left => block_left + pad,
        }
    };

    let mut y = block_top;
    let x = line_x(&overlay.first, &name_font, 0.0, 0.0);
    draw_2d.text(assets, fonts.name, x, y, &overlay.first, name_color);
    y += name_line;

    let x = line_x(&overlay.last, &name_font, 0.0, 0.0);
    draw_2d.text(assets, fonts.name, x, y, &overlay.last, name_color);
    y += name_line + margin_top;

    let x = line_x(&overlay.sub, &sub_font, letter_spacing, sub_pad);
    draw_2d.text_spaced(
        assets,
        fonts.sub,
        x,
        y,
        &overlay.sub,
        sub_color,
        letter_spacing,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::TILT_X_DEG;
    use glam::{EulerRot, Quat};

    #[test]
    fn spin_accumulates_by_fixed_step() {
        let mut spin = 0.0f32;
        for _ in 0..1000 {
            spin += SPIN_STEP;
        }
        assert!((spin - 2.0).abs() < 1e-4);
    }

    #[test]
    fn spin_rotation_keeps_tilt_while_yaw_advances() {
        let q = spin_rotation(1000.0 * SPIN_STEP);
        let expected = Quat::from_euler(
            EulerRot::XYZ,
            TILT_X_DEG.to_radians(),
            crate::cube::TILT_Y_DEG.to_radians() + 2.0,
            0.0,
        );
        assert!(q.abs_diff_eq(expected, 1e-4) || q.abs_diff_eq(-expected, 1e-4));
    }

    #[test]
    fn cube_plan_fits_the_pass_budget() {
        let plan = CubePlan::build();
        let draws = plan.cubelets.len() + 2 * plan.sticker_count();
        assert_eq!(draws, 27 + 108);
        assert!(draws <= 160);
    }
}
