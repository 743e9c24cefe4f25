use crate::model::Task;

/// Printed instead of an empty table.
pub const EMPTY_MESSAGE: &str = "No tasks to show.";

/// Spaces between columns.
const PADDING: usize = 4;

const COLUMNS: [&str; 4] = ["ID", "Description", "Created", "Done"];

fn cells(task: &Task) -> [String; 4] {
    [
        task.id.to_string(),
        // Keep multi-line descriptions on one table row.
        task.description.replace('\n', " "),
        task.created_str(),
        task.icon().to_string(),
    ]
}

pub fn format_task_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return format!("{EMPTY_MESSAGE}\n");
    }

    let rows: Vec<[String; 4]> = tasks.iter().map(cells).collect();
    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    write_line(&mut out, &COLUMNS, &widths);
    for row in &rows {
        write_line(&mut out, row, &widths);
    }
    out
}

fn write_line<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let last = cells.len() - 1;
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        let cell = cell.as_ref();
        if i == last {
            out.push_str(cell);
        } else {
            let pad = width - cell.chars().count() + PADDING;
            out.push_str(cell);
            out.push_str(&" ".repeat(pad));
        }
    }
    out.push('\n');
}

/// Single-line rendering used when confirming a complete or delete.
pub fn format_task_row(task: &Task) -> String {
    format!(
        "{} {}  {}  (created {})\n",
        task.icon(),
        task.id,
        task.description.replace('\n', " "),
        task.created_str()
    )
}
