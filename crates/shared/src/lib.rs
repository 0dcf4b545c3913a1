use serde::{Deserialize, Serialize};

pub mod numeric;

pub use numeric::{evaluate_numeric, NumericError};

/// Уникальный идентификатор объекта в сцене (монотонный в пределах сессии)
pub type ObjectId = u64;

/// Значение, которым заменяется неположительная компонента масштаба
pub const SCALE_EPSILON: f64 = 0.01;

/// Имя опорной плиты по умолчанию
pub const BASEPLATE_NAME: &str = "Baseplate";

/// Имя точки появления по умолчанию
pub const SPAWN_LOCATION_NAME: &str = "SpawnLocation";

fn default_version() -> u32 {
    1
}

/// Тип объекта сцены (закрытое множество)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Обычный блок (деталь)
    Block,
    /// Точка появления актёра в режиме игры
    SpawnPoint,
    /// Группа объектов
    Group,
    /// Носитель поведения
    Behavior,
}

impl ObjectKind {
    /// Все типы в порядке отображения
    pub fn all() -> &'static [ObjectKind] {
        &[
            ObjectKind::Block,
            ObjectKind::SpawnPoint,
            ObjectKind::Group,
            ObjectKind::Behavior,
        ]
    }

    /// Имя, которое получает новый объект этого типа
    pub fn default_name(&self) -> &'static str {
        match self {
            ObjectKind::Block => "Part",
            ObjectKind::SpawnPoint => SPAWN_LOCATION_NAME,
            ObjectKind::Group => "Model",
            ObjectKind::Behavior => "Script",
        }
    }

    /// Цвет нового объекта, если он не выбирается случайно
    pub fn default_color(&self) -> Color {
        match self {
            ObjectKind::Block => Color::rgb(0x9b, 0x87, 0xf5),
            ObjectKind::SpawnPoint => Color::rgb(0x3b, 0x82, 0xf6),
            ObjectKind::Group => Color::rgb(0xa3, 0xa3, 0xa3),
            ObjectKind::Behavior => Color::rgb(0x10, 0xb9, 0x81),
        }
    }

    /// Масштаб нового объекта
    pub fn default_scale(&self) -> [f64; 3] {
        match self {
            ObjectKind::SpawnPoint => [4.0, 0.2, 4.0],
            _ => [1.0, 1.0, 1.0],
        }
    }
}

/// Ось трёхмерного пространства
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Индекс компоненты вектора
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// Ошибка разбора цвета
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{0}': expected #rrggbb")]
pub struct ColorParseError(pub String);

/// Цвет sRGB, сериализуется как строка `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Цвет из HSL (оттенок в градусах, насыщенность и светлота в 0..=1)
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self([to_u8(r), to_u8(g), to_u8(b)])
    }

    /// Разбор строки `#rrggbb` (решётка необязательна)
    pub fn parse_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorParseError(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| ColorParseError(s.to_string()))
        };
        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Объект сцены — единица редактируемого содержимого
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    /// Отображаемое имя (не обязано быть уникальным)
    pub name: String,
    pub kind: ObjectKind,
    pub position: [f64; 3],
    /// Углы Эйлера в радианах (порядок XYZ)
    pub rotation: [f64; 3],
    /// Масштаб, все компоненты строго положительны
    pub scale: [f64; 3],
    pub color: Color,
    /// Неудаляемая часть сцены по умолчанию (плита и точка появления)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub scaffold: bool,
}

impl SceneObject {
    /// Новый объект с параметрами по умолчанию для данного типа
    pub fn new(id: ObjectId, kind: ObjectKind, position: [f64; 3]) -> Self {
        Self {
            id,
            name: kind.default_name().to_string(),
            kind,
            position,
            rotation: [0.0; 3],
            scale: kind.default_scale(),
            color: kind.default_color(),
            scaffold: false,
        }
    }

    /// Защищён ли объект от удаления
    pub fn is_protected(&self) -> bool {
        self.scaffold
    }
}

/// Приводит компоненту масштаба к строго положительному значению:
/// положительные значения сохраняются, остальные (и NaN) заменяются на `SCALE_EPSILON`
pub fn clamp_scale(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        SCALE_EPSILON
    }
}

/// Описание сцены — упорядоченная коллекция объектов (формат сохранения)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Версия формата
    #[serde(default = "default_version")]
    pub version: u32,
    pub objects: Vec<SceneObject>,
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self {
            version: default_version(),
            objects: Vec::new(),
        }
    }
}

impl SceneDescription {
    pub fn new(objects: Vec<SceneObject>) -> Self {
        Self {
            version: default_version(),
            objects,
        }
    }

    /// Сцена нового проекта: опорная плита и точка появления
    pub fn default_scene() -> Self {
        let baseplate = SceneObject {
            id: 1,
            name: BASEPLATE_NAME.to_string(),
            kind: ObjectKind::Block,
            position: [0.0, -0.5, 0.0],
            rotation: [0.0; 3],
            scale: [100.0, 1.0, 100.0],
            color: Color::rgb(0x4a, 0x4a, 0x4a),
            scaffold: true,
        };
        let spawn = SceneObject {
            id: 2,
            name: SPAWN_LOCATION_NAME.to_string(),
            kind: ObjectKind::SpawnPoint,
            position: [0.0, 0.1, 0.0],
            rotation: [0.0; 3],
            scale: [4.0, 0.2, 4.0],
            color: Color::rgb(0x3b, 0x82, 0xf6),
            scaffold: true,
        };
        Self::new(vec![baseplate, spawn])
    }

    /// Наибольший идентификатор в коллекции
    pub fn max_id(&self) -> ObjectId {
        self.objects.iter().map(|o| o.id).max().unwrap_or(0)
    }

    /// Восстанавливает флаг `scaffold` у сцены, где он не задан ни у одного объекта
    /// (например, JSON, импортированный без этого поля): защищаются плита
    /// `Baseplate` и точка `SpawnLocation` с наименьшими id. Возвращает `true`,
    /// если что-то было помечено.
    pub fn restore_scaffolding(&mut self) -> bool {
        if self.objects.iter().any(|o| o.scaffold) {
            return false;
        }
        let mut restored = false;
        for (kind, name) in [
            (ObjectKind::Block, BASEPLATE_NAME),
            (ObjectKind::SpawnPoint, SPAWN_LOCATION_NAME),
        ] {
            if let Some(obj) = self
                .objects
                .iter_mut()
                .filter(|o| o.kind == kind && o.name == name)
                .min_by_key(|o| o.id)
            {
                obj.scaffold = true;
                restored = true;
            }
        }
        restored
    }

    /// Активная точка появления: среди нескольких выбирается наименьший id
    pub fn active_spawn(&self) -> Option<&SceneObject> {
        self.objects
            .iter()
            .filter(|o| o.kind == ObjectKind::SpawnPoint)
            .min_by_key(|o| o.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_roundtrip() {
        let c = Color::parse_hex("#9b87f5").unwrap();
        assert_eq!(c, Color::rgb(0x9b, 0x87, 0xf5));
        assert_eq!(c.to_hex(), "#9b87f5");
        assert_eq!(Color::parse_hex("3B82F6").unwrap(), Color::rgb(0x3b, 0x82, 0xf6));
    }

    #[test]
    fn test_color_rejects_garbage() {
        assert!(Color::parse_hex("#12345").is_err());
        assert!(Color::parse_hex("#gg0000").is_err());
        assert!(Color::parse_hex("").is_err());
    }

    #[test]
    fn test_color_from_hsl_primaries() {
        assert_eq!(Color::from_hsl(0.0, 1.0, 0.5), Color::rgb(255, 0, 0));
        assert_eq!(Color::from_hsl(120.0, 1.0, 0.5), Color::rgb(0, 255, 0));
        assert_eq!(Color::from_hsl(240.0, 1.0, 0.5), Color::rgb(0, 0, 255));
        assert_eq!(Color::from_hsl(0.0, 0.0, 1.0), Color::rgb(255, 255, 255));
    }

    #[test]
    fn test_object_serde_uses_hex_color() {
        let obj = SceneObject::new(7, ObjectKind::Block, [1.0, 2.0, 3.0]);
        let json = serde_json::to_string(&obj).unwrap();
        assert!(json.contains("\"color\":\"#9b87f5\""));
        assert!(json.contains("\"kind\":\"block\""));
        assert!(!json.contains("scaffold"));

        let back: SceneObject = serde_json::from_str(&json).unwrap();
        assert_eq!(back, obj);
    }

    #[test]
    fn test_default_scene_scaffolding() {
        let scene = SceneDescription::default_scene();
        assert_eq!(scene.objects.len(), 2);
        assert!(scene.objects.iter().all(|o| o.is_protected()));
        assert_eq!(scene.active_spawn().map(|o| o.id), Some(2));
        assert_eq!(scene.max_id(), 2);
    }

    #[test]
    fn test_active_spawn_lowest_id_wins() {
        let scene = SceneDescription::new(vec![
            SceneObject::new(9, ObjectKind::SpawnPoint, [5.0, 0.0, 0.0]),
            SceneObject::new(3, ObjectKind::Block, [0.0; 3]),
            SceneObject::new(4, ObjectKind::SpawnPoint, [-5.0, 0.0, 0.0]),
        ]);
        assert_eq!(scene.active_spawn().map(|o| o.id), Some(4));
    }

    #[test]
    fn test_restore_scaffolding_for_unflagged_scene() {
        let mut scene = SceneDescription::default_scene();
        for obj in &mut scene.objects {
            obj.scaffold = false;
        }
        scene.objects.push(SceneObject::new(3, ObjectKind::SpawnPoint, [5.0, 0.0, 0.0]));
        assert!(scene.restore_scaffolding());
        let flags: Vec<bool> = scene.objects.iter().map(|o| o.scaffold).collect();
        assert_eq!(flags, vec![true, true, false]);
        assert!(!scene.restore_scaffolding());
    }

    #[test]
    fn test_restore_scaffolding_leaves_flagged_scene() {
        let mut scene = SceneDescription::new(vec![
            SceneObject::new(1, ObjectKind::SpawnPoint, [0.0; 3]),
            SceneObject {
                scaffold: true,
                ..SceneObject::new(2, ObjectKind::Block, [0.0; 3])
            },
        ]);
        assert!(!scene.restore_scaffolding());
        assert!(!scene.objects[0].scaffold);
    }

    #[test]
    fn test_clamp_scale() {
        assert_eq!(clamp_scale(2.5), 2.5);
        assert_eq!(clamp_scale(0.0), SCALE_EPSILON);
        assert_eq!(clamp_scale(-3.0), SCALE_EPSILON);
        assert_eq!(clamp_scale(0.005), 0.005);
        assert_eq!(clamp_scale(f64::NAN), SCALE_EPSILON);
    }

    #[test]
    fn test_scene_version_defaults() {
        let scene: SceneDescription = serde_json::from_str(r#"{"objects": []}"#).unwrap();
        assert_eq!(scene.version, 1);
    }
}
