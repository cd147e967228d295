use anyhow::{Context, Result};
use filter_compiler::catalog;
use filter_compiler::lexer::Lexer;
use filter_compiler::{FieldMapping, Parser, QueryCompiler, Token};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const DEFAULT_MAPPING_FILE: &str = "field_mapping.json";

const HELP: &str = r#"输入过滤表达式, 例如：
  timestamp > 1 and CHANNEL_1 <= 1
  not (shotnum = 3 or activeArea is not null)
或者 JSON token 列表：
  [{"kind":"channel","value":"CHANNEL_1"},{"kind":"unaryOp","value":"is null"}]
命令：
  :ops   显示运算符目录
  :help  显示帮助
  :quit  退出"#;

/// 加载字段映射，失败时使用默认配置
fn load_mapping(path: &str) -> FieldMapping {
    match FieldMapping::from_json_file(path) {
        Ok(mapping) => {
            println!("✅ 成功从JSON配置文件加载字段映射: {}", path);
            println!("✅ 元数据通道: {:?}", mapping.metadata_fields);
            mapping
        }
        Err(e) => {
            println!("⚠️ 无法加载JSON配置文件 ({}), 使用默认配置", e);
            FieldMapping::default()
        }
    }
}

/// 以 `[` 开头的输入按 JSON token 列表解析，否则交给词法分析器
fn read_tokens(line: &str) -> Result<Vec<Token>> {
    if line.starts_with('[') {
        serde_json::from_str(line).context("无法解析JSON token 列表")
    } else {
        Ok(Lexer::new(line).collect())
    }
}

fn compile_line(line: &str, compiler: &QueryCompiler) -> Result<()> {
    let tokens = read_tokens(line)?;
    log::debug!("tokens: {:?}", tokens);

    let mut parser = Parser::new(&tokens);
    let condition = parser.parse()?;
    println!("{}", compiler.compile(&condition));

    let remaining = parser.remaining();
    if !remaining.is_empty() {
        let ignored: Vec<&str> = remaining.iter().map(|t| t.value.as_str()).collect();
        println!("⚠️ 忽略了表达式之后的 {} 个 token: {}", remaining.len(), ignored.join(" "));
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    println!("--- Filter Compiler: 过滤表达式到查询文档 ---");

    let mapping_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_MAPPING_FILE.to_string());
    let compiler = QueryCompiler::new(load_mapping(&mapping_path));

    println!("输入 :help 查看帮助\n");

    let mut editor = DefaultEditor::new().context("无法初始化行编辑器")?;
    loop {
        match editor.readline("filter> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if let Err(e) = editor.add_history_entry(line) {
                    log::warn!("无法写入历史记录: {}", e);
                }

                match line {
                    ":quit" | ":q" => break,
                    ":help" => println!("{}", HELP),
                    ":ops" => println!("{}", serde_json::to_string_pretty(&catalog::snapshot())?),
                    _ => {
                        if let Err(e) = compile_line(line, &compiler) {
                            println!("✗ {:#}", e);
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
