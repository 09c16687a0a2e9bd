use serde_json::{json, Value};

const LEFT_EYE: [usize; 6] = [33, 160, 158, 133, 153, 144];
const RIGHT_EYE: [usize; 6] = [263, 387, 385, 362, 380, 373];
const MESH_POINTS: usize = 478;

/// 构造一张 FaceMesh 网格，两只眼的形状使双眼 EAR 恰为 `ratio`
///
/// 眼宽固定 0.1（归一化），上下眼睑配对点垂直间距 = ratio * 眼宽，
/// 搭配相同的 frameWidth/frameHeight 使用时比值不受缩放影响。
pub fn mesh_with_ear(ratio: f64) -> Value {
    let mut points: Vec<Value> = (0..MESH_POINTS).map(|_| json!({"x": 0.0, "y": 0.0})).collect();

    let width = 0.10;
    let vertical = ratio * width;
    for (indices, x0) in [(LEFT_EYE, 0.30), (RIGHT_EYE, 0.60)] {
        let y = 0.50;
        let shape = [
            (x0, y),
            (x0 + width / 3.0, y - vertical / 2.0),
            (x0 + 2.0 * width / 3.0, y - vertical / 2.0),
            (x0 + width, y),
            (x0 + 2.0 * width / 3.0, y + vertical / 2.0),
            (x0 + width / 3.0, y + vertical / 2.0),
        ];
        for (&idx, &(x, y)) in indices.iter().zip(shape.iter()) {
            points[idx] = json!({ "x": x, "y": y });
        }
    }

    Value::Array(points)
}

/// 眼部关键点全部重合的网格：水平距离为零，EAR 无定义
pub fn degenerate_mesh() -> Value {
    let mut points: Vec<Value> = (0..MESH_POINTS).map(|_| json!({"x": 0.0, "y": 0.0})).collect();
    for idx in LEFT_EYE.into_iter().chain(RIGHT_EYE) {
        points[idx] = json!({ "x": 0.5, "y": 0.5 });
    }
    Value::Array(points)
}

/// 不足以覆盖眼部索引的短网格
pub fn short_mesh() -> Value {
    Value::Array((0..10).map(|_| json!({"x": 0.5, "y": 0.5})).collect())
}

pub fn frame_body(landmarks: Value) -> Value {
    json!({
        "frameWidth": 1000.0,
        "frameHeight": 1000.0,
        "landmarks": landmarks,
    })
}

pub fn no_face_body() -> Value {
    json!({
        "frameWidth": 1000.0,
        "frameHeight": 1000.0,
        "landmarks": null,
    })
}
