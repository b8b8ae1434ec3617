use super::*;

impl SuperChipApp {
    /// Rendering function to redraw the most recent frame buffer snapshot, scaled to fill the
    /// central panel.  Before the first snapshot arrives only the background is drawn.
    pub(crate) fn render_frame_buffer(&self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(self.background_colour))
            .show(ctx, |ui| {
                let frame_buffer: &Display = match &self.frame_buffer {
                    Some(frame_buffer) => frame_buffer,
                    None => return,
                };
                let painter = ui.painter();
                // Screen pixels per emulated pixel; both resolutions fill the same area
                let width: usize = frame_buffer.width();
                let height: usize = frame_buffer.height();
                let pixel_size: Vec2 = Vec2::new(
                    ui.available_width() / width as f32,
                    ui.available_height() / height as f32,
                );
                let origin: Pos2 = ui.min_rect().min;
                for y in 0..height {
                    for x in 0..width {
                        if !frame_buffer.get_pixel(x, y) {
                            continue;
                        }
                        let min: Pos2 = Pos2::new(
                            origin.x + x as f32 * pixel_size.x,
                            origin.y + y as f32 * pixel_size.y,
                        );
                        painter.rect_filled(
                            Rect::from_min_size(min, pixel_size),
                            Rounding::none(),
                            self.foreground_colour,
                        );
                    }
                }
            });
    }
}
