//! EAR (Eye Aspect Ratio) 计算模块
//!
//! 基于6个眼部关键点计算单眼 EAR，取双眼平均作为帧级睁眼度指标。
//! EAR 值越低表示眼睛越接近闭合，是困倦检测的核心输入。

use thiserror::Error;

use crate::detection::geometry::{NormalizedPoint, Point2D};

/// MediaPipe FaceMesh 左眼关键点索引，按 p1..p6 角色顺序排列
pub const LEFT_EYE_LANDMARKS: [usize; 6] = [33, 160, 158, 133, 153, 144];
/// MediaPipe FaceMesh 右眼关键点索引，按 p1..p6 角色顺序排列
pub const RIGHT_EYE_LANDMARKS: [usize; 6] = [263, 387, 385, 362, 380, 373];

/// 水平距离低于该值视为退化几何（关键点共点/共线），EAR 无定义
const MIN_HORIZONTAL_DISTANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricError {
    /// 关键点数量不足以覆盖眼部索引
    #[error("insufficient landmarks: mesh has {got} points, index {required} required")]
    InsufficientLandmarks { got: usize, required: usize },
    /// 退化几何导致比值无定义
    #[error("eye aspect ratio undefined: degenerate horizontal distance")]
    Undefined,
}

/// 单眼的6个关键点，像素坐标
///
/// 顺序固定为 p1..p6：外眼角、上眼睑两点、内眼角、下眼睑两点。
/// 顺序错乱会得到数值上合法但语义错误的比值，构造方负责保序。
#[derive(Debug, Clone, Copy)]
pub struct EyeLandmarks {
    points: [Point2D; 6],
}

impl EyeLandmarks {
    pub fn new(points: [Point2D; 6]) -> Self {
        Self { points }
    }

    /// 从完整 FaceMesh 网格中按索引提取一只眼的6个点并反归一化
    pub fn from_mesh(
        mesh: &[NormalizedPoint],
        indices: &[usize; 6],
        frame_width: f64,
        frame_height: f64,
    ) -> Result<Self, MetricError> {
        let mut points = [Point2D::new(0.0, 0.0); 6];
        for (slot, &idx) in points.iter_mut().zip(indices.iter()) {
            let lm = mesh.get(idx).ok_or(MetricError::InsufficientLandmarks {
                got: mesh.len(),
                required: idx,
            })?;
            *slot = lm.to_pixel(frame_width, frame_height);
        }
        Ok(Self { points })
    }

    /// 单眼 EAR
    ///
    /// 公式: EAR = (|p2-p6| + |p3-p5|) / (2 * |p1-p4|)
    /// - p1, p4: 眼角点（水平方向）
    /// - p2, p6 / p3, p5: 上下眼睑配对点
    pub fn aspect_ratio(&self) -> Result<f64, MetricError> {
        let [p1, p2, p3, p4, p5, p6] = self.points;

        let horizontal = p1.distance(&p4);
        if horizontal < MIN_HORIZONTAL_DISTANCE {
            return Err(MetricError::Undefined);
        }

        let vertical1 = p2.distance(&p6);
        let vertical2 = p3.distance(&p5);
        Ok((vertical1 + vertical2) / (2.0 * horizontal))
    }
}

/// 双眼联合 EAR：分别计算左右眼后取算术平均
pub fn binocular_ratio(left: &EyeLandmarks, right: &EyeLandmarks) -> Result<f64, MetricError> {
    let left_ear = left.aspect_ratio()?;
    let right_ear = right.aspect_ratio()?;
    Ok((left_ear + right_ear) / 2.0)
}

/// 从完整网格计算双眼 EAR（路由层入口）
pub fn binocular_ear_from_mesh(
    mesh: &[NormalizedPoint],
    frame_width: f64,
    frame_height: f64,
) -> Result<f64, MetricError> {
    let left = EyeLandmarks::from_mesh(mesh, &LEFT_EYE_LANDMARKS, frame_width, frame_height)?;
    let right = EyeLandmarks::from_mesh(mesh, &RIGHT_EYE_LANDMARKS, frame_width, frame_height)?;
    binocular_ratio(&left, &right)
}
