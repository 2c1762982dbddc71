// ==========================================
// 导入模板生成器
// ==========================================
// 用途: 生成三种导入类型的 CSV 模板
// 输出: tests/fixtures/templates/<locale>/*.csv
// 用法: cargo run --bin generate_templates [zh-CN|en]
// 环境变量: LOG_FORMAT=json 输出 JSON 日志
// ==========================================

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use training_import::importer::{BatchSchema, CourseSchema, ParticipantSchema, RecordSchema};
use training_import::logging;

fn main() -> Result<(), Box<dyn Error>> {
    if std::env::var("LOG_FORMAT").map(|v| v == "json").unwrap_or(false) {
        logging::init_json();
    } else {
        logging::init();
    }

    let locale = std::env::args().nth(1).unwrap_or_else(|| "zh-CN".to_string());

    let output_dir = PathBuf::from("tests/fixtures/templates").join(&locale);
    fs::create_dir_all(&output_dir)?;

    let templates = [
        BatchSchema.template(&locale),
        CourseSchema::new().template(&locale),
        ParticipantSchema::new(0).template(&locale),
    ];

    for template in &templates {
        let path = output_dir.join(&template.file_name);
        fs::write(&path, template.to_csv_bytes()?)?;
        info!(path = %path.display(), columns = template.headers.len(), "模板已生成");
    }

    println!("已生成 {} 个模板: {}", templates.len(), output_dir.display());
    Ok(())
}
