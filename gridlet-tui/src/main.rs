mod ui;

use std::fs::File;
use std::io;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
    execute, terminal,
};
use gridlet::{Modifiers, Record, RecordSource, Table, TableConfig};
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

/// Wheel step in data rows.
const SCROLL_STEP: usize = 3;

const ATHLETES: &str = r#"[
{"name":"Mara Voss","sport":"running","height":1.68,"weight":54.2,"born":"1996-04-12T00:00:00Z"},
{"name":"Jonas Leppik","sport":"rowing","height":1.93,"weight":88.5,"born":"1991-11-02T00:00:00Z"},
{"name":"Abeba Tesfay","sport":"running","height":1.60,"weight":47.8,"born":"1999-07-23T00:00:00Z"},
{"name":"Kenji Morita","sport":"judo","height":1.71,"weight":73,"born":"1994-02-17T00:00:00Z"},
{"name":"Lena Brandt","sport":"swimming","height":1.79,"weight":63.4,"born":"1997-09-30T00:00:00Z"},
{"name":"Tomasz Wrona","sport":"cycling","height":1.82,"weight":71.6,"born":"1990-05-08T00:00:00Z"},
{"name":"Ines Okafor","sport":"volleyball","height":1.88,"weight":70.1,"born":"1998-12-04T00:00:00Z"},
{"name":"Pavel Hruban","sport":"fencing","height":1.80,"weight":75.3,"born":"1989-03-26T00:00:00Z"},
{"name":"Sena Yildiz","sport":"triathlon","height":1.65,"weight":52.9,"born":"2000-06-14T00:00:00Z"},
{"name":"Owen McGrath","sport":"rowing","height":1.98,"weight":92.7,"born":"1992-08-19T00:00:00Z"},
{"name":"Aiko Shimura","sport":"swimming","height":1.62,"weight":null,"born":"2001-01-27T00:00:00Z"},
{"name":"Ravi Pillai","sport":"cycling","height":1.75,"weight":64.8,"born":"1995-10-05T00:00:00Z"},
{"name":"Clara Nygaard","sport":"running","height":1.70,"weight":55.6,"born":"1998-02-09T00:00:00Z"},
{"name":"Dmitri Valek","sport":"judo","height":1.77,"weight":81.2,"born":"1988-07-07T00:00:00Z"},
{"name":"Noor Haddad","sport":"fencing","height":1.69,"weight":58.4,"born":"1999-04-21T00:00:00Z"},
{"name":"Felix Arnesen","sport":"swimming","height":1.91,"weight":78.9,"born":"1993-12-16T00:00:00Z"},
{"name":"Gita Rao","sport":"triathlon","height":1.58,"weight":49.5,"born":"2002-03-03T00:00:00Z"},
{"name":"Marco Bellini","sport":"cycling","height":1.78,"weight":68,"born":"1991-06-29T00:00:00Z"},
{"name":"Hana Kovar","sport":"volleyball","height":1.84,"weight":66.7,"born":"1997-05-11T00:00:00Z"},
{"name":"Sipho Dlamini","sport":"running","height":1.74,"weight":60.3,"born":"1996-09-02T00:00:00Z"},
{"name":"Elsa Lindqvist","sport":"rowing","height":1.81,"weight":72.4,"born":"1994-11-25T00:00:00Z"},
{"name":"Yusuf Demir","sport":"judo","height":1.66,"weight":66.1,"born":"1990-01-13T00:00:00Z"},
{"name":"Petra Szabo","sport":"fencing","height":1.72,"weight":61.8,"born":"1995-08-08T00:00:00Z"},
{"name":"Liam Doyle","sport":"triathlon","height":1.83,"weight":74.6,"born":"1997-02-22T00:00:00Z"},
{"name":"Ana Petrov","sport":"swimming","height":1.73,"weight":59.2,"born":"2000-10-18T00:00:00Z"},
{"name":"Koji Tanaka","sport":"cycling","height":1.69,"weight":63.1,"born":"1992-04-04T00:00:00Z"},
{"name":"Maja Olsen","sport":"running","height":1.64,"weight":50.7,"born":"2003-07-15T00:00:00Z"},
{"name":"Victor Fonseca","sport":"rowing","height":1.95,"weight":90.8,"born":"1989-09-09T00:00:00Z"},
{"name":"Zara Malik","sport":"volleyball","height":1.90,"weight":72.9,"born":"1999-11-07T00:00:00Z"},
{"name":"Erik Holm","sport":"judo","height":1.86,"weight":86.4,"born":"1991-02-28T00:00:00Z"},
{"name":"Thea Moreau","sport":"fencing","height":1.63,"born":"2001-05-30T00:00:00Z"},
{"name":"Andri Gudjonsson","sport":"triathlon","height":1.87,"weight":76.2,"born":"1993-03-12T00:00:00Z"},
{"name":"Bianca Farkas","sport":"swimming","height":1.70,"weight":57.5,"born":"1998-08-26T00:00:00Z"},
{"name":"Cillian Walsh","sport":"cycling","height":1.76,"weight":67.3,"born":"1994-12-01T00:00:00Z"},
{"name":"Dalia Mansour","sport":"running","height":1.61,"weight":48.6,"born":"2004-01-19T00:00:00Z"},
{"name":"Emil Novak","sport":"rowing","height":1.92,"weight":85,"born":"1990-10-23T00:00:00Z"},
{"name":"Freja Dahl","sport":"volleyball","height":1.82,"weight":64.2,"born":"2002-06-06T00:00:00Z"},
{"name":"Goran Ilic","sport":"judo","height":1.79,"weight":84.7,"born":"1987-04-30T00:00:00Z"},
{"name":"Hiba Zidane","sport":"triathlon","height":1.67,"weight":53.8,"born":"2000-09-13T00:00:00Z"},
{"name":"Ivo Petricek","sport":"fencing","height":1.74,"weight":70.5,"born":"1992-11-11T00:00:00Z"},
{"name":"June Park","sport":"swimming","height":1.66,"weight":55.1,"born":"2003-02-14T00:00:00Z"},
{"name":"Kasper Lund","sport":"cycling","height":1.85,"weight":73.8,"born":"1996-07-01T00:00:00Z"},
{"name":"Leila Benali","sport":"running","height":1.59,"weight":46.9,"born":"2005-03-28T00:00:00Z"},
{"name":"Matteo Ricci","sport":"rowing","height":1.89,"weight":83.6,"born":"1993-05-24T00:00:00Z"},
{"name":"Nadia Sow","sport":"volleyball","height":1.86,"weight":68.9,"born":"1998-10-31T00:00:00Z"},
{"name":"Oskar Weiss","sport":"judo","height":1.75,"weight":79.4,"born":"1989-12-20T00:00:00Z"},
{"name":"Priya Nair","sport":"triathlon","height":1.62,"weight":50.2,"born":"2001-08-17T00:00:00Z"},
{"name":"Quinn Adair","sport":"fencing","height":1.71,"weight":62.6,"born":"1995-01-06T00:00:00Z"}
]"#;

struct Screen {
    out: io::Stdout,
}

impl Screen {
    fn new() -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;
        Ok(Self { out })
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

fn main() -> io::Result<()> {
    let log_file = File::create("gridlet-tui.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let records: Vec<Record> = serde_json::from_str(ATHLETES).expect("sample data parses");
    info!("loaded {} sample records", records.len());

    let (_, height) = terminal::size()?;
    let rows = ui::page_rows(height).max(4) as f64;
    let mut table = Table::new(
        RecordSource::from_records(records),
        TableConfig::default().rows(rows),
    )
    .expect("sample configuration is valid");

    let mut screen = Screen::new()?;
    let mut viewport = 0usize;

    loop {
        let size = terminal::size()?;
        let page = ui::page_rows(size.1);
        viewport = viewport.min(table.rendered().saturating_sub(page));
        ui::draw(&mut screen.out, &table, size, viewport)?;

        match event::read()? {
            Event::Key(key) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('a') => {
                    table.toggle_all();
                }
                KeyCode::Up => viewport = viewport.saturating_sub(1),
                KeyCode::Down => scroll_down(&mut table, &mut viewport, 1, size.1),
                KeyCode::PageUp => viewport = viewport.saturating_sub(page),
                KeyCode::PageDown => scroll_down(&mut table, &mut viewport, page, size.1),
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    click(&mut table, &mouse, size, &mut viewport);
                }
                MouseEventKind::ScrollUp => viewport = viewport.saturating_sub(SCROLL_STEP),
                MouseEventKind::ScrollDown => {
                    scroll_down(&mut table, &mut viewport, SCROLL_STEP, size.1);
                }
                _ => {}
            },
            _ => {}
        }

        let changes = table.take_changes();
        if changes > 0 {
            info!("value changed, now exposing {} records", table.value().len());
        }
    }
    Ok(())
}

/// Routes a left click to the select-all checkbox, a header, or a data row.
fn click(table: &mut Table, mouse: &MouseEvent, size: (u16, u16), viewport: &mut usize) {
    let modifiers = to_modifiers(mouse.modifiers);
    if mouse.row == 0 {
        if mouse.column < ui::GUTTER {
            table.toggle_all();
        } else {
            let widths = ui::column_widths(table, size.0);
            if let Some(position) = ui::column_at(mouse.column, &widths) {
                let name = table.columns()[position].name.clone();
                // A resort rebuilds the window; jump back to the top of it.
                if table.click_header(&name, modifiers).is_handled() {
                    *viewport = 0;
                }
            }
        }
    } else if mouse.row >= ui::HEADER_ROWS {
        let line = (mouse.row - ui::HEADER_ROWS) as usize;
        let row = table.visible_rows().get(*viewport + line).map(|view| view.row);
        if let Some(row) = row {
            table.click_row(row, modifiers);
        }
    }
}

/// Moves the viewport down, growing the rendered window when it runs into
/// the end of what has been built so far.
fn scroll_down(table: &mut Table, viewport: &mut usize, step: usize, height: u16) {
    let page = ui::page_rows(height);
    *viewport += step;
    if *viewport + page >= table.rendered() {
        table.scroll_hint();
    }
    *viewport = (*viewport).min(table.rendered().saturating_sub(page));
}

fn to_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        shift: mods.contains(KeyModifiers::SHIFT),
        alt: mods.contains(KeyModifiers::ALT),
    }
}
