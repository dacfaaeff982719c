use crate::CanvasApp;

pub fn toolbar(app: &mut CanvasApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("Export").clicked() {
                app.export();
            }

            let importing = app.pending_import().is_waiting();
            if ui.add_enabled(!importing, egui::Button::new("Import")).clicked() {
                app.request_import(ctx);
            }

            ui.separator();

            if ui.button("➖").clicked() {
                app.session.zoom_out();
            }
            ui.label(app.session.zoom().label());
            if ui.button("➕").clicked() {
                app.session.zoom_in();
            }

            ui.separator();

            let counters = app.session.counters();
            if ui.button(counters.undo_label()).clicked() {
                app.session.undo();
            }
            if ui.button(counters.redo_label()).clicked() {
                app.session.redo();
            }
        });
    });
}
