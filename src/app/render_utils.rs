use eframe::egui::{Color32, Painter, Pos2, Rect, Vec2};

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(250, 250, 250));
}

/// World origin sits at the viewport center; the camera applies pan then zoom.
pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}

#[cfg(test)]
mod tests {
    use super::{screen_to_world, world_to_screen};
    use eframe::egui::{Rect, pos2, vec2};

    #[test]
    fn camera_transform_round_trips() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(800.0, 600.0));
        let pan = vec2(35.0, -12.0);
        let zoom = 2.5;

        let world = vec2(17.0, -4.0);
        let screen = world_to_screen(rect, pan, zoom, world);
        let back = screen_to_world(rect, pan, zoom, screen);
        assert!((back - world).length() < 1e-4);
    }

    #[test]
    fn origin_maps_to_viewport_center_plus_pan() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(400.0, 200.0));
        let screen = world_to_screen(rect, vec2(10.0, 5.0), 3.0, vec2(0.0, 0.0));
        assert_eq!(screen, pos2(210.0, 105.0));
    }
}
