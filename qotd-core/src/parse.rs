use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Чтение цитат из произвольного reader'а.
///
/// Формат построчный:
/// - строка на `#` — комментарий, выбрасывается целиком
/// - `\#...` — экранированный `#`, ведущий backslash снимается
/// - одиночный `\` — намеренно пустая строка внутри абзаца
/// - пустая строка завершает абзац; строки абзаца склеиваются через `\n`
///
/// Хвостовой аккумулятор добавляется только если он непустой: источник,
/// оканчивающийся пустыми строками (или целиком пустой), не порождает
/// фантомную пустую цитату.
pub fn read_quotes<R: io::Read>(reader: R) -> io::Result<Vec<String>> {
    let mut quotes = Vec::new();
    let mut acc: Vec<String> = Vec::new();

    let buf = BufReader::new(reader);
    for line in buf.lines() {
        let mut line = line?;

        if line.starts_with('#') {
            continue;
        }

        if line.starts_with("\\#") {
            line.remove(0);
        }

        if !line.is_empty() {
            if line == "\\" {
                line.clear();
            }
            acc.push(line);
        } else if !acc.is_empty() {
            quotes.push(acc.join("\n"));
            acc.clear();
        }
    }

    if !acc.is_empty() {
        quotes.push(acc.join("\n"));
    }

    Ok(quotes)
}

/// Чтение цитат из файла
pub fn read_quotes_from_path(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let f = File::open(path)?;
    read_quotes(f)
}
