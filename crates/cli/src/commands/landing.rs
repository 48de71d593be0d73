//! Landing page controllers from the terminal

use anyhow::{bail, Context, Result};
use bankist_landing::{scroll_to_first_section, LandingPage, NavAction};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Next,
    Prev,
    Dot(usize),
    /// `None` is a click that missed every tab
    Tab(Option<usize>),
    Open,
    Close,
    Key(String),
    Hover(usize),
    Leave,
    Click(usize),
    LearnMore,
    /// Header visible (`true`) or scrolled away
    Header(bool),
    Reveal(usize),
    ImageSeen(usize),
    ImageLoaded(usize),
    State,
    Help,
    Quit,
}

pub fn parse(line: &str) -> Result<Option<Command>> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, args)) = parts.split_first() else {
        return Ok(None);
    };

    let command = match (name.to_lowercase().as_str(), args) {
        ("next", []) => Command::Next,
        ("prev", []) => Command::Prev,
        ("dot", [index]) => Command::Dot(parse_index(index)?),
        ("tab", []) => Command::Tab(None),
        ("tab", [index]) => Command::Tab(Some(parse_index(index)?)),
        ("open", []) => Command::Open,
        ("close", []) => Command::Close,
        ("key", [key]) => Command::Key(key.to_string()),
        ("hover", [index]) => Command::Hover(parse_index(index)?),
        ("leave", []) => Command::Leave,
        ("click", [index]) => Command::Click(parse_index(index)?),
        ("learn", []) => Command::LearnMore,
        ("header", ["in"]) => Command::Header(true),
        ("header", ["out"]) => Command::Header(false),
        ("reveal", [index]) => Command::Reveal(parse_index(index)?),
        ("seen", [index]) => Command::ImageSeen(parse_index(index)?),
        ("loaded", [index]) => Command::ImageLoaded(parse_index(index)?),
        ("state", []) => Command::State,
        ("help", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        (other, _) => bail!("Unknown command or wrong arguments: {} (try `help`)", other),
    };

    Ok(Some(command))
}

fn parse_index(raw: &str) -> Result<usize> {
    raw.parse()
        .with_context(|| format!("Index must be a number, got {:?}", raw))
}

fn print_help() {
    println!("Commands:");
    println!("  next | prev | dot <i>     slider");
    println!("  tab [i]                   activate a tab (no index = click outside)");
    println!("  open | close | key <Key>  modal and keyboard (Escape, ArrowLeft, ArrowRight)");
    println!("  hover <i> | leave | click <i> | learn   navigation");
    println!("  header in|out | reveal <i> | seen <i> | loaded <i>   scrolling");
    println!("  state | help | quit");
}

fn print_slider(page: &LandingPage) {
    let dots: String = page
        .carousel
        .dots()
        .iter()
        .map(|active| if *active { '●' } else { '○' })
        .collect();
    println!(
        "Slide {}/{} {}  offsets {:?}",
        page.carousel.current() + 1,
        page.carousel.len(),
        dots,
        page.carousel.offsets()
    );
}

fn describe(action: &NavAction) -> String {
    match action {
        NavAction::ScrollTo(anchor) => format!("scroll to {}", anchor),
        NavAction::OpenBank => "open the banking dashboard".to_string(),
    }
}

/// Apply one command to the page
pub fn execute(page: &mut LandingPage, command: Command) -> Result<()> {
    match command {
        Command::Next => {
            page.carousel.next();
            print_slider(page);
        }
        Command::Prev => {
            page.carousel.prev();
            print_slider(page);
        }
        Command::Dot(index) => {
            page.carousel.go_to(index)?;
            print_slider(page);
        }
        Command::Tab(clicked) => {
            if page.tabs.activate(clicked)? {
                println!("Tab {} active", page.tabs.active() + 1);
            }
        }
        Command::Open => {
            page.modal.open();
            println!("Modal open");
        }
        Command::Close => {
            page.modal.close();
            println!("Modal closed");
        }
        Command::Key(key) => {
            let was_open = page.modal.is_open();
            if page.handle_key(&key) {
                if was_open && !page.modal.is_open() {
                    println!("Modal closed");
                }
                if key.starts_with("Arrow") {
                    print_slider(page);
                }
            }
        }
        Command::Hover(index) => {
            page.hover.hover(index)?;
            let opacities: Vec<f32> = (0..page.hover.links().len())
                .map(|i| page.hover.opacity(i))
                .collect();
            println!("Link opacity {:?}, logo {}", opacities, page.hover.logo_opacity());
        }
        Command::Leave => {
            page.hover.leave();
            println!("All links at full opacity");
        }
        Command::Click(index) => {
            let action = page.hover.click(index)?;
            println!("→ {}", describe(action));
        }
        Command::LearnMore => println!("→ {}", describe(&scroll_to_first_section())),
        Command::Header(visible) => {
            let sticky = page.nav.on_header_intersection(visible);
            println!("Nav {}", if sticky { "sticky" } else { "static" });
        }
        Command::Reveal(index) => {
            if page.sections.on_intersection(index, true)? {
                println!("Section {} revealed", page.sections.sections()[index].id);
            }
        }
        Command::ImageSeen(index) => {
            let image = page
                .images
                .get_mut(index)
                .with_context(|| format!("No image {}", index))?;
            if image.on_intersection(true) {
                println!("Image {} -> {}", index, image.src);
            }
        }
        Command::ImageLoaded(index) => {
            let image = page
                .images
                .get_mut(index)
                .with_context(|| format!("No image {}", index))?;
            image.on_load();
            println!("Image {} blurred: {}", index, image.is_blurred());
        }
        Command::State => {
            let json = serde_json::to_string_pretty(&*page).context("Failed to serialize page")?;
            println!("{}", json);
        }
        Command::Help => print_help(),
        Command::Quit => {}
    }
    Ok(())
}

pub async fn run(slides: usize, tabs: usize) -> Result<()> {
    let mut page = LandingPage::new(slides, tabs).context("Invalid landing page layout")?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_help();
    print_slider(&page);

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        match parse(&line) {
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => {
                if let Err(err) = execute(&mut page, command) {
                    println!("❌ {:#}", err);
                }
            }
            Ok(None) => {}
            Err(err) => println!("⚠️  {:#}", err),
        }
    }

    Ok(())
}
