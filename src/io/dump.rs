//! 表格输出 - 逐槽位打印表内容与汇总

use crate::map::{HashTable, SlotView};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

const RULE_WIDTH: usize = 78;

fn write_row<W: Write>(out: &mut W, cells: [&str; 7]) -> io::Result<()> {
    let [index, name, id, car, time, line, state] = cells;
    writeln!(
        out,
        "{:>6} | {:<16} | {:>8} | {:<12} | {:<8} | {:>6} | {}",
        index, name, id, car, time, line, state
    )
}

fn write_slot<W: Write>(out: &mut W, view: &SlotView<'_>) -> io::Result<()> {
    let index = view.index.to_string();
    let state = view.state.as_str();
    match view.record {
        Some(record) => write_row(
            out,
            [
                &index,
                &record.name,
                &record.id.to_string(),
                &record.car_model,
                &record.time,
                &record.origin_index.to_string(),
                state,
            ],
        ),
        None => write_row(out, [&index, "-", "-", "-", "-", "-", state]),
    }
}

/// 按槽位顺序写出整张表，末尾附容量与负载汇总
pub fn write_table<W: Write>(table: &HashTable, out: &mut W) -> io::Result<()> {
    write_row(out, ["slot", "name", "id", "car", "time", "line", "state"])?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    for view in table.slots() {
        write_slot(out, &view)?;
    }

    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    writeln!(
        out,
        "capacity: {}, occupied slots: {}, live records: {}, tombstones: {}, load factor: {:.3}",
        table.capacity(),
        table.occupied_slots(),
        table.len(),
        table.tombstones(),
        table.load_factor()
    )
}

/// 渲染为字符串
pub fn render_table(table: &HashTable) -> String {
    let mut buffer = Vec::new();
    // 写入内存缓冲不会失败
    let _ = write_table(table, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// 写入文件 (覆盖已有内容)
pub fn dump_to_path(table: &HashTable, path: impl AsRef<Path>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_table(table, &mut writer)?;
    writer.flush()
}
