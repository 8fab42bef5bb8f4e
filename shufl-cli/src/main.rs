mod config;
mod library;

use std::{
    io::{self, BufRead},
    path::PathBuf,
    process, thread,
};

use crossbeam_channel::{select, unbounded, Sender};
use shufl_core::{
    entry::EntryForm,
    error::Error,
    item::{Item, ItemId},
    nav::{BackPress, DetailPane, PaneNavigator},
    photo::{FsPhotos, PhotoHandle},
    pipeline::{FilterCommand, FilterPipeline, PipelineEvent},
    promise::Promise,
    store::{MemoryStore, QuerySource, StoreHandle},
};

use crate::config::Config;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        log::error!("fatal: {}", err);
        process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let config = Config::load().unwrap_or_default();
    let store = MemoryStore::new();
    let library_path = config.library_path();
    let seeded = library::seed_from_file(&store, &library_path)?;
    log::info!("loaded {} items from {:?}", seeded, library_path);

    let photos = FsPhotos::new(&config.photo_base())?;
    let mut pipeline = FilterPipeline::new(store.clone());
    let mut navigator = PaneNavigator::new();

    let (shell_send, shell_recv) = unbounded();
    let _input_thread = thread::spawn(move || read_commands(shell_send));

    let pipeline_events = pipeline.receiver();
    println!("shufl: l list, g/p/c filter, r/x pick, o/e/s/b/B panes, a/d items, q quit");
    loop {
        select! {
            recv(pipeline_events) -> event => {
                let Ok(event) = event else { break };
                pipeline.handle(event);
                print_state(&pipeline, &navigator, &store);
            }
            recv(shell_recv) -> command => {
                let Ok(command) = command else { break };
                if apply(command, &mut pipeline, &mut navigator, &store, &photos) {
                    break;
                }
                print_state(&pipeline, &navigator, &store);
            }
        }
    }

    library::save_to_file(&store, &library_path)?;
    config.save();
    Ok(())
}

enum ShellCommand {
    Filter(FilterCommand),
    Open(ItemId),
    Edit(ItemId),
    SaveEdit(EntryForm, Option<PathBuf>),
    Add(EntryForm, Option<PathBuf>),
    Delete(ItemId),
    Back,
    BackButton,
    Show,
    Quit,
}

fn read_commands(sender: Sender<ShellCommand>) {
    for line in io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Some(command) => {
                let quit = matches!(command, ShellCommand::Quit);
                if sender.send(command).is_err() || quit {
                    return;
                }
            }
            None => log::warn!("unknown command: {}", line),
        }
    }
    let _ = sender.send(ShellCommand::Quit);
}

fn parse_command(line: &str) -> Option<ShellCommand> {
    let line = line.trim();
    let (letter, rest) = match line.split_once(char::is_whitespace) {
        Some((letter, rest)) => (letter, rest.trim()),
        None => (line, ""),
    };
    match letter {
        "g" if !rest.is_empty() => Some(ShellCommand::Filter(FilterCommand::SetGenre(rest.into()))),
        "p" => Some(ShellCommand::Filter(FilterCommand::SetPlayerCountText(
            rest.into(),
        ))),
        "c" => Some(ShellCommand::Filter(FilterCommand::ClearFilters)),
        "r" => Some(ShellCommand::Filter(FilterCommand::PickRandom)),
        "x" => Some(ShellCommand::Filter(FilterCommand::ClearRandomPick)),
        "o" => parse_id(rest).map(ShellCommand::Open),
        "e" => parse_id(rest).map(ShellCommand::Edit),
        "s" if !rest.is_empty() => {
            let (form, photo) = parse_entry(rest)?;
            Some(ShellCommand::SaveEdit(form, photo))
        }
        "a" if !rest.is_empty() => {
            let (form, photo) = parse_entry(rest)?;
            Some(ShellCommand::Add(form, photo))
        }
        "d" => parse_id(rest).map(ShellCommand::Delete),
        "b" => Some(ShellCommand::Back),
        "B" => Some(ShellCommand::BackButton),
        "l" => Some(ShellCommand::Show),
        "q" => Some(ShellCommand::Quit),
        _ => None,
    }
}

fn parse_id(text: &str) -> Option<ItemId> {
    text.parse().ok().map(ItemId)
}

/// `name;genre;min;max;photo`, trailing fields optional.
fn parse_entry(text: &str) -> Option<(EntryForm, Option<PathBuf>)> {
    let mut fields = text.split(';').map(str::trim);
    let mut form = EntryForm::default();
    form.name = fields.next()?.to_owned();
    if let Some(genre) = fields.next() {
        form.genre = genre.to_owned();
    }
    if let Some(min) = fields.next() {
        form.min_players = min.to_owned();
    }
    if let Some(max) = fields.next() {
        form.max_players = max.to_owned();
    }
    let photo = fields
        .next()
        .filter(|path| !path.is_empty())
        .map(PathBuf::from);
    Some((form, photo))
}

fn apply(
    command: ShellCommand,
    pipeline: &mut FilterPipeline,
    navigator: &mut PaneNavigator,
    store: &StoreHandle,
    photos: &PhotoHandle,
) -> bool {
    match command {
        ShellCommand::Filter(command) => pipeline.handle(PipelineEvent::Command(command)),
        ShellCommand::Open(id) => navigator.open(id),
        ShellCommand::Edit(id) => navigator.edit(id),
        ShellCommand::SaveEdit(mut form, photo) => {
            let DetailPane::EditItem(id) = navigator.current() else {
                log::warn!("no edit in progress");
                return false;
            };
            if let Some(photo) = photo {
                if let Err(err) = form.attach_photo(photos.as_ref(), &photo) {
                    log::warn!("photo selection failed: {}", err);
                }
            }
            match form.save_edit(id, store.as_ref(), photos.as_ref()) {
                Ok(id) => navigator.finish_edit(id),
                Err(err) => log::warn!("save failed: {}", err),
            }
        }
        ShellCommand::Add(mut form, photo) => {
            if let Some(photo) = photo {
                if let Err(err) = form.attach_photo(photos.as_ref(), &photo) {
                    log::warn!("photo selection failed: {}", err);
                }
            }
            match form.save(store.as_ref(), photos.as_ref()) {
                Ok(id) => println!("added item {}", id),
                Err(err) => log::warn!("add failed: {}", err),
            }
        }
        ShellCommand::Delete(id) => {
            if let Err(err) = store.delete(id) {
                log::warn!("delete failed: {}", err);
            }
        }
        ShellCommand::Back => navigator.back(),
        ShellCommand::BackButton => {
            if navigator.back_pressed() == BackPress::NotIntercepted {
                // Falls through to the platform default: leave the screen.
                return true;
            }
        }
        ShellCommand::Show => {}
        ShellCommand::Quit => return true,
    }
    false
}

fn print_state(pipeline: &FilterPipeline, navigator: &PaneNavigator, store: &StoreHandle) {
    let state = pipeline.ui_state();

    match &state.items {
        Promise::Empty | Promise::Deferred(_) => println!("loading…"),
        Promise::Resolved(items) => {
            println!("{} items ({})", items.len(), describe_criteria(state));
            for item in items {
                println!("  [{}] {}{}", item.id, item.name, describe(item));
            }
        }
        Promise::Rejected(err) => println!("item query failed: {}", err),
    }
    if let Promise::Resolved(genres) = &state.genres {
        if !genres.is_empty() {
            println!("genres: {}", genres.join(", "));
        }
    }
    if let Some(pick) = &state.random_pick {
        println!("random pick: {}", pick.name);
    }
    match navigator.current() {
        DetailPane::Hidden => {}
        DetailPane::ViewItem(id) => println!("viewing {}", describe_id(store, id)),
        DetailPane::EditItem(id) => println!("editing {}", describe_id(store, id)),
    }
}

fn describe_criteria(state: &shufl_core::pipeline::UiState) -> String {
    if !state.criteria.is_active() {
        return "no filters".to_owned();
    }
    let mut parts = Vec::new();
    if let Some(genre) = &state.criteria.selected_genre {
        parts.push(format!("genre={}", genre));
    }
    let text = state.criteria.player_count_text.trim();
    if !text.is_empty() {
        parts.push(format!("players={}", text));
    }
    parts.join(", ")
}

fn describe(item: &Item) -> String {
    let mut parts = Vec::new();
    if let Some(genre) = &item.genre {
        parts.push(genre.clone());
    }
    match (item.min_players, item.max_players) {
        (Some(min), Some(max)) => parts.push(format!("{}-{} players", min, max)),
        (Some(min), None) => parts.push(format!("{}+ players", min)),
        _ => {}
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

fn describe_id(store: &StoreHandle, id: ItemId) -> String {
    match store.get(id) {
        Ok(Some(item)) => format!("[{}] {}", item.id, item.name),
        _ => format!("[{}] <missing>", id),
    }
}
