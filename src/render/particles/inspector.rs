//! 调试检查面板接口
//!
//! 粒子系统通过 `Inspector` 暴露可编辑的配置字段。控件的取值范围由面板负责钳制，
//! `ParticleSystem::debug_ui` 在编辑后再统一调用 `clamp_ranges` 兜底。

use glam::{Vec3, Vec4};
use std::ops::RangeInclusive;

/// 调试检查面板
///
/// 每个控件方法在值被修改时返回 `true`。
pub trait Inspector {
    /// 可折叠的分组，默认展开
    fn section(&mut self, label: &str, contents: &mut dyn FnMut(&mut dyn Inspector));

    fn drag_float(
        &mut self,
        label: &str,
        value: &mut f32,
        speed: f32,
        range: Option<RangeInclusive<f32>>,
    ) -> bool;

    fn drag_int(
        &mut self,
        label: &str,
        value: &mut u32,
        speed: f32,
        range: Option<RangeInclusive<u32>>,
    ) -> bool;

    fn drag_vec3(&mut self, label: &str, value: &mut Vec3, speed: f32) -> bool;

    fn color_edit(&mut self, label: &str, value: &mut Vec4) -> bool;
}

/// 构造 `lo..=hi`，当 `hi < lo` 时退化为 `lo..=lo`
pub(crate) fn bounded<T: PartialOrd + Copy>(lo: T, hi: T) -> RangeInclusive<T> {
    if hi < lo {
        lo..=lo
    } else {
        lo..=hi
    }
}

impl Inspector for egui::Ui {
    fn section(&mut self, label: &str, contents: &mut dyn FnMut(&mut dyn Inspector)) {
        egui::CollapsingHeader::new(label)
            .default_open(true)
            .show(self, |ui| {
                let inspector: &mut dyn Inspector = ui;
                contents(inspector);
            });
    }

    fn drag_float(
        &mut self,
        label: &str,
        value: &mut f32,
        speed: f32,
        range: Option<RangeInclusive<f32>>,
    ) -> bool {
        self.horizontal(|ui| {
            let mut drag = egui::DragValue::new(value).speed(speed);
            if let Some(range) = range {
                drag = drag.clamp_range(range);
            }
            let changed = ui.add(drag).changed();
            ui.label(label);
            changed
        })
        .inner
    }

    fn drag_int(
        &mut self,
        label: &str,
        value: &mut u32,
        speed: f32,
        range: Option<RangeInclusive<u32>>,
    ) -> bool {
        self.horizontal(|ui| {
            let mut drag = egui::DragValue::new(value).speed(speed);
            if let Some(range) = range {
                drag = drag.clamp_range(range);
            }
            let changed = ui.add(drag).changed();
            ui.label(label);
            changed
        })
        .inner
    }

    fn drag_vec3(&mut self, label: &str, value: &mut Vec3, speed: f32) -> bool {
        self.horizontal(|ui| {
            let mut changed = false;
            changed |= ui
                .add(egui::DragValue::new(&mut value.x).prefix("X: ").speed(speed))
                .changed();
            changed |= ui
                .add(egui::DragValue::new(&mut value.y).prefix("Y: ").speed(speed))
                .changed();
            changed |= ui
                .add(egui::DragValue::new(&mut value.z).prefix("Z: ").speed(speed))
                .changed();
            ui.label(label);
            changed
        })
        .inner
    }

    fn color_edit(&mut self, label: &str, value: &mut Vec4) -> bool {
        self.horizontal(|ui| {
            let mut rgba = value.to_array();
            let changed = ui.color_edit_button_rgba_unmultiplied(&mut rgba).changed();
            if changed {
                *value = Vec4::from_array(rgba);
            }
            ui.label(label);
            changed
        })
        .inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded() {
        assert_eq!(bounded(1.0, 3.0), 1.0..=3.0);
        assert_eq!(bounded(5u32, 2), 5..=5);
    }
}
