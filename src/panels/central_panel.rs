use crate::CanvasApp;
use crate::renderer::Renderer;

pub fn central_panel(app: &mut CanvasApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        app.renderer.sync(ctx, app.session.surface());
        let size = Renderer::display_size(app.session.surface(), app.session.zoom());

        egui::ScrollArea::both().show(ui, |ui| {
            let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
            app.canvas_origin = rect.min;
            app.renderer.render(ui.painter(), rect);

            let response = response.on_hover_cursor(app.session.cursor());
            let pressed = ui.input(|i| i.pointer.primary_pressed());
            if pressed && response.is_pointer_button_down_on() {
                if let Some(pointer) = response.interact_pointer_pos() {
                    let pos = app.screen_to_surface(pointer);
                    if app.session.pointer_down(pos) {
                        app.focus_overlay = true;
                    }
                }
            }
        });
    });

    // After the canvas, so a click that blurs the field cannot reopen it this frame
    text_overlay(app, ctx);
}

fn text_overlay(app: &mut CanvasApp, ctx: &egui::Context) {
    let Some(anchor) = app.session.text_entry().anchor() else {
        return;
    };
    let scale = app.session.zoom().scale();
    let font_size = app.font_size * scale;
    // The anchor is the baseline; the field's top sits one em above it
    let top_left = app.surface_to_screen(anchor) - egui::vec2(0.0, font_size);
    let request_focus = std::mem::take(&mut app.focus_overlay);

    let mut commit = false;
    egui::Area::new(egui::Id::new("text_overlay"))
        .order(egui::Order::Foreground)
        .fixed_pos(top_left)
        .show(ctx, |ui| {
            if let Some(buffer) = app.session.text_buffer_mut() {
                let response = ui.add(
                    egui::TextEdit::singleline(buffer)
                        .frame(false)
                        .font(egui::FontId::proportional(font_size))
                        .text_color(egui::Color32::BLACK)
                        .desired_width(240.0 * scale),
                );
                if request_focus {
                    response.request_focus();
                }
                // Enter and clicking elsewhere both end up here
                commit = response.lost_focus();
            }
        });

    if commit {
        if let Err(err) = app.session.commit_text() {
            log::error!("Failed to commit text: {}", err);
        }
    }
}
