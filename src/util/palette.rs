use palette::{
    Srgb,
    WithAlpha,
    stimulus::IntoStimulus,
};

pub mod serde {
    // colors are stored as `[r, g, b]` with components in `[0, 1]`.
    pub use palette::serde::as_array::*;
}

pub trait EguiPaletteConversions {
    fn palette_to_egui(&self) -> egui::Color32;
}

impl<S, T> EguiPaletteConversions for palette::rgb::Rgba<S, T>
where
    T: IntoStimulus<u8> + Copy,
{
    fn palette_to_egui(&self) -> egui::Color32 {
        let color_u8 = self.into_format::<u8, u8>();
        egui::Color32::from_rgba_unmultiplied(
            color_u8.red,
            color_u8.green,
            color_u8.blue,
            color_u8.alpha,
        )
    }
}

impl<S, T> EguiPaletteConversions for palette::rgb::Rgb<S, T>
where
    T: IntoStimulus<u8> + Copy,
{
    fn palette_to_egui(&self) -> egui::Color32 {
        let color_u8 = self.into_format::<u8>();
        egui::Color32::from_rgb(color_u8.red, color_u8.green, color_u8.blue)
    }
}

/// Color with the given opacity, for translucent shapes.
pub fn translucent(color: Srgb, opacity: f32) -> egui::Color32 {
    color.with_alpha(opacity).palette_to_egui()
}

#[cfg(test)]
mod tests {
    use palette::Srgb;

    use crate::util::palette::{
        EguiPaletteConversions,
        translucent,
    };

    #[test]
    fn it_converts_to_egui_colors() {
        let purple: Srgb = Srgb::<u8>::new(0x80, 0x00, 0x80).into_format();
        assert_eq!(
            purple.palette_to_egui(),
            egui::Color32::from_rgb(0x80, 0x00, 0x80)
        );
    }

    #[test]
    fn it_keeps_opacity() {
        let color = translucent(Srgb::new(0.5, 0.5, 0.5), 0.2);
        assert_eq!(color.to_srgba_unmultiplied()[3], 51);
    }
}
