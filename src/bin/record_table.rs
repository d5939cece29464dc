use clap::Parser;
use quadratic_hashtable::{
    dump_to_path, load_file, write_table, HashTable, Record, StatsRecorder,
};
use std::{error::Error, io, path::PathBuf};

#[derive(Parser)]
#[command(author, version, about = "将停车记录载入开放寻址哈希表", long_about = None)]
struct Cli {
    /// 输入文件，每行 `name carModel time id`
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// 读取的记录条数 (默认读完整个文件)
    #[arg(short, long, requires = "input")]
    count: Option<usize>,
    /// 查找键，格式 NAME:ID
    #[arg(short, long, value_parser = parse_key)]
    find: Vec<(String, i64)>,
    /// 删除键，格式 NAME:ID
    #[arg(short, long, value_parser = parse_key)]
    remove: Vec<(String, i64)>,
    /// 表格输出文件 (默认标准输出)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// 结束后打印 Prometheus 指标
    #[arg(long)]
    stats: bool,
    /// 在新表上运行内置演示场景
    #[arg(long)]
    scenarios: bool,
}

fn parse_key(value: &str) -> Result<(String, i64), String> {
    let (name, id) = value
        .rsplit_once(':')
        .ok_or_else(|| format!("应为 NAME:ID 格式，实际为 `{value}`"))?;
    let id = id
        .parse::<i64>()
        .map_err(|err| format!("无效编号 `{id}`: {err}"))?;
    Ok((name.to_string(), id))
}

fn emit(table: &HashTable, output: Option<&PathBuf>) -> io::Result<()> {
    match output {
        Some(path) => dump_to_path(table, path),
        None => write_table(table, &mut io::stdout().lock()),
    }
}

fn print_metrics(recorder: &dyn StatsRecorder) {
    println!("{}", recorder.export_prometheus());
}

fn run_scenarios() -> io::Result<()> {
    let mut table = HashTable::new();
    let mut line = 0;
    let mut next_record = |id: i64| {
        line += 1;
        Record::new("Ivanov", "Lada", "10:00", id).with_origin(line)
    };

    println!("== A: 插入6条 ==");
    for id in 100..106 {
        table.insert(next_record(id));
    }
    write_table(&table, &mut io::stdout().lock())?;

    println!("\n== B: 再插入4条 ==");
    for id in 106..110 {
        table.insert(next_record(id));
    }
    write_table(&table, &mut io::stdout().lock())?;
    for id in 100..110 {
        println!("查找 (Ivanov, {id}) -> {}", table.origin_index_of("Ivanov", id));
    }

    println!("\n== C: 删除编号 100..=104 ==");
    for id in 100..105 {
        table.remove("Ivanov", id);
    }
    write_table(&table, &mut io::stdout().lock())?;
    for id in 100..110 {
        println!("查找 (Ivanov, {id}) -> {}", table.origin_index_of("Ivanov", id));
    }

    println!("\n== D: 重复键 ==");
    let mut fresh = HashTable::new();
    let first = fresh.insert(Record::new("X", "Volga", "08:00", 1).with_origin(1));
    let second = fresh.try_insert(Record::new("X", "Niva", "09:00", 1).with_origin(2));
    println!("第一次插入: {first}");
    match second {
        Ok(()) => println!("第二次插入: true"),
        Err(err) => println!("第二次插入: false ({err})"),
    }
    if let Some(record) = fresh.find("X", 1) {
        println!("保留: {record}");
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.scenarios {
        run_scenarios()?;
        return Ok(());
    }

    let mut table = HashTable::new();

    if let Some(input) = &cli.input {
        let report = load_file(&mut table, input, cli.count)?;
        eprintln!(
            "读取 {} 条记录: 插入 {} 条，拒绝 {} 条",
            report.read, report.inserted, report.rejected
        );
        if let Some(err) = &report.error {
            eprintln!("加载提前停止: {err}");
        }
    }

    for (name, id) in &cli.remove {
        match table.try_remove(name, *id) {
            Ok(record) => eprintln!("已删除 {record}"),
            Err(err) => eprintln!("{err}"),
        }
    }

    emit(&table, cli.output.as_ref())?;

    for (name, id) in &cli.find {
        let lookup = table.lookup(name, *id);
        println!(
            "查找 ({name}, {id}) -> {} (探测 {} 次)",
            lookup.origin_index(),
            lookup.probes
        );
    }

    if cli.stats {
        print_metrics(table.stats_recorder().as_ref());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("Ivanov:7"), Ok(("Ivanov".to_string(), 7)));
        assert_eq!(parse_key("a:b:-3"), Ok(("a:b".to_string(), -3)));
        assert!(parse_key("Ivanov").unwrap_err().contains("NAME:ID"));
        assert!(parse_key("Ivanov:x").unwrap_err().starts_with("无效编号"));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
