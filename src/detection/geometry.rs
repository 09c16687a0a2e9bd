use serde::Deserialize;

/// 像素坐标系中的点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 两点间欧氏距离
    pub fn distance(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// 外部关键点检测器输出的归一化坐标（[0,1] 范围）
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    /// 按帧尺寸缩放为像素坐标
    pub fn to_pixel(&self, frame_width: f64, frame_height: f64) -> Point2D {
        Point2D::new(self.x * frame_width, self.y * frame_height)
    }
}
