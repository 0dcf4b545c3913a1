use std::sync::atomic::{AtomicU8, Ordering};

use crate::state::Language;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    Ru,
    En,
}

impl From<Language> for Lang {
    fn from(l: Language) -> Self {
        match l {
            Language::Russian => Lang::Ru,
            Language::English => Lang::En,
        }
    }
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=Ru (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::En,
        _ => Lang::Ru,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::Ru => 0,
            Lang::En => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ru = lang() == Lang::Ru;
    match key {
        // ── Main menus ──────────────────────────────────────
        "menu.file" => if ru { "Файл" } else { "File" },
        "menu.new" => if ru { "Новый проект" } else { "New project" },
        "menu.open_project" => if ru { "Открыть проект..." } else { "Open project..." },
        "menu.save_project" => if ru { "Сохранить  Ctrl+S" } else { "Save  Ctrl+S" },
        "menu.import" => if ru { "Импорт сцены..." } else { "Import scene..." },
        "menu.import_title" => if ru { "Открыть JSON сцены" } else { "Open Scene JSON" },
        "menu.export" => if ru { "Экспорт сцены..." } else { "Export scene..." },
        "menu.export_title" => if ru { "Сохранить JSON сцены" } else { "Save Scene JSON" },
        "menu.quit" => if ru { "Выход" } else { "Quit" },

        "menu.edit" => if ru { "Правка" } else { "Edit" },
        "menu.undo" => if ru { "Отменить  Ctrl+Z" } else { "Undo  Ctrl+Z" },
        "menu.redo" => if ru { "Повторить  Ctrl+Shift+Z" } else { "Redo  Ctrl+Shift+Z" },
        "menu.duplicate" => if ru { "Дублировать  Ctrl+D" } else { "Duplicate  Ctrl+D" },
        "menu.delete" => if ru { "Удалить  Del" } else { "Delete  Del" },
        "menu.deselect" => if ru { "Снять выделение  Esc" } else { "Deselect  Esc" },
        "menu.clear_scene" => if ru { "Очистить сцену" } else { "Clear scene" },

        "menu.view" => if ru { "Вид" } else { "View" },
        "menu.explorer" => if ru { "Проводник" } else { "Explorer" },
        "menu.properties" => if ru { "Свойства" } else { "Properties" },
        "menu.reset_camera" => if ru { "Сбросить камеру" } else { "Reset camera" },
        "menu.language" => if ru { "Язык" } else { "Language" },

        "menu.insert" => if ru { "Вставка" } else { "Insert" },
        "menu.settings" => if ru { "Настройки" } else { "Settings" },
        "menu.preferences" => if ru { "Параметры..." } else { "Preferences..." },

        // ── Object kinds ────────────────────────────────────
        "kind.block" => if ru { "Деталь" } else { "Part" },
        "kind.spawn_point" => if ru { "Точка появления" } else { "Spawn location" },
        "kind.group" => if ru { "Модель" } else { "Model" },
        "kind.behavior" => if ru { "Скрипт" } else { "Script" },

        // ── Tools ───────────────────────────────────────────
        "tool.select" => if ru { "Выбор" } else { "Select" },
        "tool.move" => if ru { "Перемещение" } else { "Move" },
        "tool.scale" => if ru { "Масштаб" } else { "Scale" },
        "tool.rotate" => if ru { "Поворот" } else { "Rotate" },

        // ── Toolbar ─────────────────────────────────────────
        "tb.play" => if ru { "▶ Играть" } else { "▶ Play" },
        "tb.stop" => if ru { "■ Стоп" } else { "■ Stop" },
        "tb.add" => if ru { "Добавить" } else { "Add" },
        "tb.undo_tip" => if ru { "Отменить (Ctrl+Z)" } else { "Undo (Ctrl+Z)" },
        "tb.redo_tip" => if ru { "Повторить (Ctrl+Shift+Z)" } else { "Redo (Ctrl+Shift+Z)" },
        "tb.save_tip" => if ru { "Сохранить проект (Ctrl+S)" } else { "Save project (Ctrl+S)" },

        // ── Explorer ────────────────────────────────────────
        "explorer.title" => if ru { "Проводник" } else { "Explorer" },
        "explorer.workspace" => if ru { "Рабочая область" } else { "Workspace" },
        "explorer.duplicate" => if ru { "Дублировать" } else { "Duplicate" },
        "explorer.delete" => if ru { "Удалить" } else { "Delete" },
        "explorer.locked" => if ru { "Защищён" } else { "Locked" },

        // ── Properties ──────────────────────────────────────
        "props.title" => if ru { "Свойства" } else { "Properties" },
        "props.nothing" => if ru { "Ничего не выбрано" } else { "Nothing selected" },
        "props.name" => if ru { "Имя" } else { "Name" },
        "props.kind" => if ru { "Тип" } else { "Type" },
        "props.position" => if ru { "Позиция" } else { "Position" },
        "props.rotation" => if ru { "Поворот (°)" } else { "Rotation (°)" },
        "props.scale" => if ru { "Размер" } else { "Size" },
        "props.color" => if ru { "Цвет" } else { "Color" },
        "props.playing" => if ru { "Редактирование недоступно в режиме игры" } else { "Editing is disabled while playing" },

        // ── Status bar ──────────────────────────────────────
        "status.objects" => if ru { "Объектов" } else { "Objects" },
        "status.selected" => if ru { "Выбран" } else { "Selected" },
        "status.editing" => if ru { "Редактирование" } else { "Editing" },
        "status.playing" => if ru { "Игра: WASD — движение, Пробел — прыжок, Esc — стоп" } else { "Playing: WASD move, Space jump, Esc stop" },
        "status.project" => if ru { "Проект" } else { "Project" },

        // ── Notices ─────────────────────────────────────────
        "notice.delete_rejected" => if ru { "Нельзя удалить" } else { "Cannot delete" },
        "notice.invalid_input" => if ru { "Неверное значение" } else { "Invalid value" },
        "notice.saved" => if ru { "Сохранено" } else { "Saved" },
        "notice.save_failed" => if ru { "Ошибка сохранения" } else { "Save failed" },
        "notice.loaded" => if ru { "Открыт проект" } else { "Opened project" },
        "notice.load_failed" => if ru { "Ошибка открытия" } else { "Open failed" },
        "notice.not_found" => if ru { "Проект не найден" } else { "Project not found" },

        // ── Open dialog ─────────────────────────────────────
        "open.title" => if ru { "Открыть проект" } else { "Open project" },
        "open.key" => if ru { "Ключ проекта" } else { "Project key" },
        "open.ok" => if ru { "Открыть" } else { "Open" },
        "open.cancel" => if ru { "Отмена" } else { "Cancel" },

        // ── Settings window ─────────────────────────────────
        "settings.title" => if ru { "Настройки" } else { "Settings" },
        "settings.grid" => if ru { "Сетка" } else { "Grid" },
        "settings.grid_visible" => if ru { "Показывать сетку" } else { "Show grid" },
        "settings.grid_size" => if ru { "Размер ячейки" } else { "Cell size" },
        "settings.grid_range" => if ru { "Количество линий" } else { "Line count" },
        "settings.grid_opacity" => if ru { "Прозрачность" } else { "Opacity" },
        "settings.viewport" => if ru { "Вьюпорт" } else { "Viewport" },
        "settings.bg_color" => if ru { "Цвет фона" } else { "Background" },
        "settings.sel_color" => if ru { "Цвет выделения" } else { "Selection" },
        "settings.spawn_opacity" => if ru { "Прозрачность точки появления" } else { "Spawn opacity" },
        "settings.simulation" => if ru { "Игровой режим" } else { "Play mode" },
        "settings.move_speed" => if ru { "Скорость" } else { "Move speed" },
        "settings.jump" => if ru { "Сила прыжка" } else { "Jump impulse" },
        "settings.gravity" => if ru { "Гравитация" } else { "Gravity" },
        "settings.damping" => if ru { "Затухание" } else { "Damping" },
        "settings.history" => if ru { "История" } else { "History" },
        "settings.max_snapshots" => if ru { "Шагов отмены" } else { "Undo steps" },
        "settings.ui" => if ru { "Интерфейс" } else { "Interface" },
        "settings.font_size" => if ru { "Размер шрифта" } else { "Font size" },
        "settings.apply" => if ru { "Сохранить" } else { "Save" },
        "settings.reset" => if ru { "По умолчанию" } else { "Reset" },
        "settings.close" => if ru { "Закрыть" } else { "Close" },

        _ => "???",
    }
}

/// Label of an object kind
pub fn kind_label(kind: shared::ObjectKind) -> &'static str {
    use shared::ObjectKind;
    t(match kind {
        ObjectKind::Block => "kind.block",
        ObjectKind::SpawnPoint => "kind.spawn_point",
        ObjectKind::Group => "kind.group",
        ObjectKind::Behavior => "kind.behavior",
    })
}
