//! Prompt templates for every generation task.
//!
//! All functions here are pure: identical requests always produce
//! byte-identical prompts. Enum-like request fields are resolved through
//! fixed lookup tables and unknown values fall back to a default fragment.

use crate::config::{LengthBudget, OutlineTemplate};
use crate::request::{DocumentRequest, ImageRequest, PostRequest, Section, StructureRequest};

/// Persona block that replaces the generic tone line for `anya_vibe`.
pub const ANYA_VIBE_TONE: &str = "Пиши в стиле Ани - учителя английского языка и ИИ.
Аня ВЕСЕЛАЯ, ПРОСТАЯ, попадает во всякие нелепые ситуации в жизни и учит английскому языку.
Она знает английский в СОВЕРШЕНСТВЕ и часто размышляет о нем, делится интересными фактами о языке, грамматике, произношении.
ЛЮБИТ ШУТИТЬ и веселиться, пишет легко и непринужденно, как будто болтает с другом.
Делится забавными историями из практики преподавания и изучения языка.

ВАЖНО:
- Когда используешь английские слова/фразы, ВСЕГДА пиши перевод в скобках сразу после. Пример: \"I'm over the moon (на седьмом небе от счастья)\"
- НЕ пиши о принцах, отношениях, парнях, свиданиях, личной жизни
- Фокусируйся на английском языке, обучении, забавных ситуациях с изучением языка
- Тон: живой, энергичный, дружелюбный, с юмором и самоиронией";

const DEFAULT_LENGTH: &str = "200-500 символов";
const DEFAULT_EMOJIS: &str = "использовать 3-5 эмодзи";
const DEFAULT_ASPECT_RATIO: &str = "1:1";

/// Number of outline sections requested for a document of `pages` pages.
pub fn section_count(pages: u32) -> u32 {
    (pages / 3).max(3)
}

fn additional_requirements(additional_info: &str) -> String {
    if additional_info.is_empty() {
        String::new()
    } else {
        format!("Дополнительные требования: {}", additional_info)
    }
}

pub fn structure_prompt(req: &StructureRequest, template: OutlineTemplate) -> String {
    match template {
        OutlineTemplate::Detailed => detailed_structure_prompt(req),
        OutlineTemplate::Compact => compact_structure_prompt(req),
    }
}

fn detailed_structure_prompt(req: &StructureRequest) -> String {
    format!(
        r#"Создай структуру для документа типа "{doc_type}" на тему: {subject}

Документ должен быть объемом примерно {pages} страниц А4.

{additional}

Верни ТОЛЬКО валидный JSON массив объектов с такой структурой:
[
  {{
    "title": "Название раздела",
    "description": "Краткое описание содержания раздела"
  }}
]

Создай {count} разделов для полного раскрытия темы. Без введения/заключения - только основные разделы.
Названия делай лаконичными и конкретными. Описания должны быть информативными (2-3 предложения).

ВАЖНО: Верни ТОЛЬКО JSON, без дополнительного текста, markdown или комментариев!"#,
        doc_type = req.doc_type,
        subject = req.subject,
        pages = req.pages,
        additional = additional_requirements(&req.additional_info),
        count = section_count(req.pages),
    )
}

fn compact_structure_prompt(req: &StructureRequest) -> String {
    format!(
        r#"Создай структуру для документа типа "{doc_type}" на тему: {subject}

Документ должен быть объемом примерно {pages} страниц А4.

{additional}

Верни ТОЛЬКО валидный JSON массив из {count} объектов:
[
  {{
    "title": "Название раздела",
    "description": "Краткое описание содержания раздела"
  }}
]

Без введения/заключения - только основные разделы.
Названия лаконичные. Описания информативные (2-3 предложения).

ВАЖНО: Верни ТОЛЬКО JSON, без markdown или комментариев!"#,
        doc_type = req.doc_type,
        subject = req.subject,
        pages = req.pages,
        additional = additional_requirements(&req.additional_info),
        count = section_count(req.pages),
    )
}

/// Target length of a drafted document, total and per section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthTarget {
    Characters { total: u32, per_section: u32 },
    Words { total: u32, per_section: u32 },
}

impl LengthTarget {
    pub fn compute(budget: LengthBudget, pages: u32, sections: usize) -> Self {
        let sections = u32::try_from(sections.max(1)).unwrap_or(u32::MAX);
        match budget {
            LengthBudget::Characters { per_page } => {
                let total = pages.saturating_mul(per_page);
                LengthTarget::Characters { total, per_section: total / sections }
            }
            LengthBudget::Words { per_page, max_total } => {
                let total = pages.saturating_mul(per_page).min(max_total);
                LengthTarget::Words { total, per_section: total / sections }
            }
        }
    }

    fn describe(&self) -> (u32, u32, &'static str) {
        match *self {
            LengthTarget::Characters { total, per_section } => (total, per_section, "символов"),
            LengthTarget::Words { total, per_section } => (total, per_section, "слов"),
        }
    }
}

fn section_listing(sections: &[Section]) -> String {
    sections
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}\n   {}", i + 1, s.title, s.description))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn document_prompt(req: &DocumentRequest, budget: LengthBudget) -> String {
    let target = LengthTarget::compute(budget, req.pages, req.topics.len());
    let (total, per_section, unit) = target.describe();

    format!(
        r#"Напиши академический {doc_type} на тему: {subject}

СТРУКТУРА ДОКУМЕНТА:
{structure}

ТРЕБОВАНИЯ:
- Общий объем: примерно {pages} страниц А4 (~{total} {unit})
- На каждый раздел: ~{per_section} {unit}
- Академический стиль, научная терминология
- Логичное изложение с примерами
- Между разделами должна быть связь
- НЕ нужно оглавление, список литературы или титульный лист
- Начинай сразу с введения и основных разделов

{additional}

Формат ответа:
ВВЕДЕНИЕ
[текст введения]

1. [Название первого раздела]
[полный текст раздела]

2. [Название второго раздела]
[полный текст раздела]

...

ЗАКЛЮЧЕНИЕ
[текст заключения]

Пиши подробно, раскрывай каждую тему полностью. Используй абзацы для структуры."#,
        doc_type = req.doc_type,
        subject = req.subject,
        structure = section_listing(&req.topics),
        pages = req.pages,
        additional = additional_requirements(&req.additional_info),
    )
}

fn platform_name(platform: &str) -> Option<&'static str> {
    match platform {
        "telegram" => Some("Telegram"),
        "vk" => Some("ВКонтакте"),
        "instagram" => Some("Instagram"),
        "facebook" => Some("Facebook"),
        _ => None,
    }
}

pub fn length_fragment(length: &str) -> &'static str {
    match length {
        "короткий" => "до 200 символов",
        "средний" => "200-500 символов",
        "длинный" => "более 500 символов",
        _ => DEFAULT_LENGTH,
    }
}

pub fn emoji_fragment(emojis: &str) -> &'static str {
    match emojis {
        "нет" => "не использовать эмодзи",
        "мало" => "использовать 1-2 эмодзи",
        "баланс" => "использовать 3-5 эмодзи",
        "много" => "использовать много эмодзи (8-12)",
        _ => DEFAULT_EMOJIS,
    }
}

pub fn tone_fragment(tone: &str) -> String {
    if tone == "anya_vibe" {
        ANYA_VIBE_TONE.to_string()
    } else {
        format!("Тон: {}", tone)
    }
}

pub fn post_prompt(req: &PostRequest) -> String {
    let platform = platform_name(&req.platform);

    format!(
        "Создай пост для {heading}.

Задача: {task}

Требования:
- {tone}
- Цель поста: {goal}
- Длина: {length}
- Эмодзи: {emojis}

Напиши готовый пост для {closing} канала/группы AnyaGPT. Только текст поста, без пояснений.",
        heading = platform.unwrap_or("социальной сети"),
        task = req.task,
        tone = tone_fragment(&req.tone),
        goal = req.goal,
        length = length_fragment(&req.length),
        emojis = emoji_fragment(&req.emojis),
        closing = platform.unwrap_or(""),
    )
}

pub fn style_fragment(style: &str) -> &'static str {
    match style {
        "фотореализм" => "Photorealistic, ultra-detailed, professional photography, high quality",
        "иллюстрация" => "Digital illustration, artistic style, vibrant colors, creative design",
        "мультяшный" => "Cartoon style, animated, colorful, fun character design",
        "минимализм" => "Minimalist design, clean lines, simple composition, elegant",
        "акварель" => "Watercolor painting style, soft colors, artistic brush strokes, gentle",
        "3d_render" => "3D render, CGI, modern digital art, clean look, professional",
        "аниме" => "Anime style, manga art, Japanese animation aesthetic, detailed",
        "комикс" => "Comic book style, bold lines, pop art colors, dynamic",
        "винтаж" => "Vintage style, retro aesthetic, nostalgic feel, classic",
        "неон" => "Neon lights, cyberpunk aesthetic, vibrant glow effects, futuristic",
        "пастель" => "Pastel colors, soft tones, dreamy atmosphere, gentle light",
        "граффити" => "Graffiti art style, urban street art, bold spray paint, expressive",
        _ => "",
    }
}

pub fn aspect_ratio(name: &str) -> &'static str {
    match name {
        "квадрат" => "1:1",
        "горизонтальный" => "16:9",
        "вертикальный" => "9:16",
        "горизонтальный_широкий" => "3:2",
        _ => DEFAULT_ASPECT_RATIO,
    }
}

pub fn image_prompt(req: &ImageRequest) -> String {
    format!(
        "{}. Style: {}. Aspect ratio: {}. High quality, detailed.",
        req.task,
        style_fragment(&req.style),
        aspect_ratio(&req.aspect_ratio),
    )
}
