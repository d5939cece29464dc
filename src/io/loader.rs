//! 批量加载 - 从文本源读取记录并插入表中
//!
//! 每行四个以空白分隔的字段：`name carModel time id`。
//! 记录的来源行号取文件中的行号 (从1开始)。

use crate::{error::LoadError, map::HashTable, types::Record};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// 加载结果
#[derive(Debug, Default)]
pub struct LoadReport {
    /// 成功解析的记录数
    pub read: usize,
    /// 成功插入的记录数
    pub inserted: usize,
    /// 被拒绝的记录数 (重复键或探测耗尽)
    pub rejected: usize,
    /// 提前停止的原因
    pub error: Option<LoadError>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// 解析一行记录
pub fn parse_line(line: &str, line_number: usize) -> Result<Record, LoadError> {
    let malformed = || LoadError::MalformedLine {
        line: line_number,
        content: line.to_string(),
    };

    let fields: Vec<&str> = line.split_whitespace().collect();
    let [name, car_model, time, id] = fields[..] else {
        return Err(malformed());
    };
    let id = id.parse::<i64>().map_err(|_| malformed())?;

    Ok(Record::new(name, car_model, time, id).with_origin(line_number as i64))
}

/// 从文本源加载至多 `limit` 条记录
///
/// `limit` 为 `None` 时读到输入结束为止，结束本身不算错误。
/// 遇到格式错误或输入提前结束时停止，已插入的记录保留。
pub fn load_records<R: BufRead>(table: &mut HashTable, reader: R, limit: Option<usize>) -> LoadReport {
    let mut report = LoadReport::default();
    let mut lines = reader.lines().enumerate();

    loop {
        if limit.is_some_and(|limit| report.read >= limit) {
            break;
        }
        let Some((offset, line)) = lines.next() else {
            break;
        };
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                report.error = Some(LoadError::Io(err));
                return report;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let record = match parse_line(&line, offset + 1) {
            Ok(record) => record,
            Err(err) => {
                log_warn!("stop loading: {}", err);
                report.error = Some(err);
                return report;
            }
        };
        report.read += 1;

        match table.try_insert(record) {
            Ok(()) => report.inserted += 1,
            Err(err) => {
                log_debug!("line {} rejected: {}", offset + 1, err);
                report.rejected += 1;
            }
        }
    }

    if let Some(requested) = limit {
        if report.read < requested {
            report.error = Some(LoadError::UnexpectedEof {
                requested,
                read: report.read,
            });
        }
    }

    log_info!(
        "loaded {} records ({} inserted, {} rejected)",
        report.read,
        report.inserted,
        report.rejected
    );
    report
}

/// 从文件加载
pub fn load_file(
    table: &mut HashTable,
    path: impl AsRef<Path>,
    limit: Option<usize>,
) -> Result<LoadReport, LoadError> {
    let file = File::open(path)?;
    Ok(load_records(table, BufReader::new(file), limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const INPUT: &str = "\
Ivanov Lada 10:00 1
Petrov Volga 11:30 2

Sidorov Niva 12:15 3
";

    #[test]
    fn test_parse_line() {
        let record = parse_line("Ivanov Lada 10:00 42", 7).unwrap();
        assert_eq!(record.name, "Ivanov");
        assert_eq!(record.car_model, "Lada");
        assert_eq!(record.time, "10:00");
        assert_eq!(record.id, 42);
        assert_eq!(record.origin_index, 7);
    }

    #[test]
    fn test_parse_line_rejects_bad_input() {
        assert!(matches!(
            parse_line("Ivanov Lada 10:00", 1),
            Err(LoadError::MalformedLine { line: 1, .. })
        ));
        assert!(parse_line("Ivanov Lada 10:00 x", 2).is_err());
        assert!(parse_line("a b c 1 extra", 3).is_err());
    }

    #[test]
    fn test_load_all_until_eof() {
        let mut table = HashTable::new();
        let report = load_records(&mut table, Cursor::new(INPUT), None);

        assert!(report.is_complete());
        assert_eq!(report.read, 3);
        assert_eq!(report.inserted, 3);
        // 空行仍计入行号
        assert_eq!(table.origin_index_of("Sidorov", 3), 4);
    }

    #[test]
    fn test_limit_stops_early() {
        let mut table = HashTable::new();
        let report = load_records(&mut table, Cursor::new(INPUT), Some(2));
        assert!(report.is_complete());
        assert_eq!(report.inserted, 2);
        assert!(!table.contains("Sidorov", 3));
    }

    #[test]
    fn test_premature_eof() {
        let mut table = HashTable::new();
        let report = load_records(&mut table, Cursor::new(INPUT), Some(5));
        assert_eq!(report.inserted, 3);
        assert!(matches!(
            report.error,
            Some(LoadError::UnexpectedEof { requested: 5, read: 3 })
        ));
    }

    #[test]
    fn test_malformed_line_stops_loading() {
        let input = "A car 1:00 1\nbroken line\nB car 2:00 2\n";
        let mut table = HashTable::new();
        let report = load_records(&mut table, Cursor::new(input), None);

        assert_eq!(report.inserted, 1);
        assert_eq!(report.error.as_ref().and_then(LoadError::line), Some(2));
        assert!(!table.contains("B", 2));
    }

    #[test]
    fn test_duplicates_counted_as_rejected() {
        let input = "A car 1:00 1\nA other 2:00 1\nB car 3:00 2\n";
        let mut table = HashTable::new();
        let report = load_records(&mut table, Cursor::new(input), Some(3));

        assert!(report.is_complete());
        assert_eq!(report.read, 3);
        assert_eq!(report.inserted, 2);
        assert_eq!(report.rejected, 1);
        assert_eq!(table.find("A", 1).unwrap().car_model, "car");
    }

    #[test]
    fn test_load_missing_file() {
        let mut table = HashTable::new();
        let result = load_file(&mut table, "/definitely/not/here.txt", None);
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
