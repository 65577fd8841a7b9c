//! 3D viewport: picking, drag-to-move, orbit and rendering
//!
//! The scene renders into an offscreen target sized to the viewport rect,
//! which is then blitted into the layout like any other widget.

use macroquad::prelude::*;

use crate::model::{AppObject, Designer, Shape};
use crate::query::QueryClient;
use crate::ui::{badge, draw_icon_centered, icon, Rect, UiContext, BORDER_COLOR, FONT_SIZE_SMALL, SELECTION_COLOR, TEXT_COLOR, TEXT_MUTED};
use super::ray::{ground_point, pick_object, screen_to_ray};
use super::state::{random_nearby, EditorState};

const SKY_COLOR: Color = Color::new(0.1, 0.11, 0.13, 1.0);
const GRID_MAJOR: Color = Color::new(0.35, 0.36, 0.42, 1.0);
const GRID_MINOR: Color = Color::new(0.2, 0.21, 0.25, 1.0);
const GRID_SLICES: u32 = 30;

/// Offscreen target the scene is drawn into
#[derive(Default)]
pub struct ViewportCanvas {
    target: Option<(RenderTarget, u32, u32)>,
}

impl ViewportCanvas {
    fn target_for(&mut self, w: u32, h: u32) -> RenderTarget {
        match &self.target {
            Some((target, tw, th)) if *tw == w && *th == h => target.clone(),
            _ => {
                let target = render_target_ex(
                    w,
                    h,
                    RenderTargetParams {
                        depth: true,
                        ..Default::default()
                    },
                );
                target.texture.set_filter(FilterMode::Linear);
                self.target = Some((target.clone(), w, h));
                target
            }
        }
    }
}

/// Handle pointer input over the viewport
pub fn handle_viewport_input(
    ctx: &mut UiContext,
    rect: Rect,
    state: &mut EditorState,
    objects: &[AppObject],
    designers: &[Designer],
    query: &mut QueryClient,
) {
    let mouse = (ctx.mouse.x, ctx.mouse.y);
    let inside = ctx.mouse.inside(&rect);
    let ray = screen_to_ray(mouse, &rect, &state.camera);

    // Pick against where objects are drawn, not where they're stored
    let displayed: Vec<AppObject> = objects
        .iter()
        .map(|o| AppObject {
            position: state.display_position(o),
            ..o.clone()
        })
        .collect();
    let hit = if inside { pick_object(&ray, &displayed) } else { None };
    state.hovered = hit.map(|o| o.id.clone());

    if inside && ctx.mouse.left_pressed && !state.drag.is_active() {
        match hit {
            Some(object) => {
                if let Some(capture) = state.captures.acquire() {
                    state.drag.pointer_down(&object.id, mouse, object.position, object.ground_offset(), capture);
                }
            }
            None if ctx.mouse.double_clicked => {
                if let Some(ground) = ground_point(&ray) {
                    state.open_create(random_nearby(ground), designers, query);
                }
            }
            None => {
                state.clear_selection();
                state.orbit_last = Some(mouse);
            }
        }
    }

    if state.drag.is_active() {
        state.drag.pointer_move(mouse, ground_point(&ray));
        // Released anywhere, even off the canvas
        if !ctx.mouse.left_down {
            let outcome = state.drag.pointer_up();
            state.finish_gesture(outcome, objects, query);
        }
    }

    // Orbit with a left drag on empty ground or a right drag anywhere
    if inside && ctx.mouse.right_pressed {
        state.orbit_last = Some(mouse);
    }
    let orbit_button = ctx.mouse.left_down || ctx.mouse.right_down;
    match state.orbit_last {
        Some(last) if orbit_button && !state.drag.is_dragging() => {
            state.camera.orbit(mouse.0 - last.0, mouse.1 - last.1);
            state.orbit_last = Some(mouse);
        }
        _ => state.orbit_last = None,
    }

    if inside && !state.captures.is_captured() {
        state.camera.zoom(ctx.mouse.scroll);
    }
}

/// Render the scene into `rect`
pub fn draw_viewport(
    rect: Rect,
    state: &mut EditorState,
    objects: &[AppObject],
    icon_font: Option<&Font>,
) {
    let (w, h) = (rect.w.max(1.0) as u32, rect.h.max(1.0) as u32);
    let target = state.canvas.target_for(w, h);

    set_camera(&state.camera.to_camera3d(rect.w / rect.h, Some(target.clone())));
    clear_background(SKY_COLOR);
    draw_grid(GRID_SLICES, 1.0, GRID_MAJOR, GRID_MINOR);

    for object in objects {
        let position = Vec3::from(state.display_position(object));
        draw_primitive(object, position);
        if state.is_selected(&object.id) {
            let half = Vec3::from(object.half_extents());
            draw_cube_wires(position, half * 2.0 + Vec3::splat(0.06), SELECTION_COLOR);
        }
    }

    set_default_camera();
    draw_texture_ex(
        &target.texture,
        rect.x,
        rect.y,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(rect.w, rect.h)),
            flip_y: true,
            ..Default::default()
        },
    );
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, BORDER_COLOR);

    // Hover label above the object
    if let Some(object) = state.hovered.as_ref().and_then(|id| objects.iter().find(|o| &o.id == id)) {
        let position = Vec3::from(state.display_position(object));
        let top = position + vec3(0.0, object.half_extents()[1] + 0.4, 0.0);
        if let Some(p) = state.camera.project(top, rect.w, rect.h) {
            let width = crate::ui::text_width(&object.name, FONT_SIZE_SMALL) + 14.0;
            badge(rect.x + p.x - width * 0.5, rect.y + p.y - 10.0, &object.name, Color::new(0.0, 0.0, 0.0, 0.8), WHITE);
        }
    }

    draw_hints(rect, icon_font);
}

fn draw_primitive(object: &AppObject, center: Vec3) {
    let color = object.render_color();
    let edge = Color::new(color.r * 0.6, color.g * 0.6, color.b * 0.6, 1.0);
    let s = object.size.scale();
    match object.shape {
        Shape::Box => {
            draw_cube(center, Vec3::splat(s), None, color);
            draw_cube_wires(center, Vec3::splat(s), edge);
        }
        Shape::Sphere => {
            draw_sphere(center, 0.5 * s, None, color);
            draw_sphere_wires(center, 0.5 * s, None, Color::new(edge.r, edge.g, edge.b, 0.35));
        }
        Shape::Cylinder => {
            // Drawn up from its base
            let height = 2.0 * Shape::Cylinder.half_height() * s;
            let base = center - vec3(0.0, height * 0.5, 0.0);
            draw_cylinder(base, 0.5 * s, 0.5 * s, height, None, color);
            draw_cylinder_wires(base, 0.5 * s, 0.5 * s, height, None, edge);
        }
    }
}

fn draw_hints(rect: Rect, icon_font: Option<&Font>) {
    let hints = [(icon::GRID, "Double click to add"), (icon::BOX, "Drag to move")];
    let mut x = rect.right() - 12.0;
    for (glyph, text) in hints.iter().rev() {
        let width = crate::ui::text_width(text, FONT_SIZE_SMALL) + 14.0 + if icon_font.is_some() { 16.0 } else { 0.0 };
        x -= width;
        let bg = Color::new(0.0, 0.0, 0.0, 0.55);
        if icon_font.is_some() {
            crate::ui::draw_rounded_rect(x, rect.y + 12.0, width, 20.0, 9.0, bg);
            draw_icon_centered(icon_font, *glyph, &Rect::new(x + 4.0, rect.y + 12.0, 16.0, 20.0), 11.0, TEXT_MUTED);
            draw_text(text, (x + 20.0).round(), rect.y + 27.0, FONT_SIZE_SMALL, TEXT_COLOR);
        } else {
            badge(x, rect.y + 12.0, text, bg, TEXT_COLOR);
        }
        x -= 8.0;
    }
}
