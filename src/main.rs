use pokemon_rpg::{
    BattleConfig, BattleContext, BattleEvent, BattleRng, BattleRunner, BattleSystem, Dex,
    MapArea, MenuInput, Party, Presenter,
};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Prints events as plain lines.
struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn present(&mut self, event: &BattleEvent) {
        match event {
            BattleEvent::SelectionChanged { index, .. } => println!("  > {}", index),
            other => {
                if let Some(line) = other.format() {
                    println!("{}", line);
                }
            }
        }
    }
}

fn parse_key(key: char) -> Option<MenuInput> {
    match key.to_ascii_lowercase() {
        'w' => Some(MenuInput::Up),
        's' => Some(MenuInput::Down),
        'a' => Some(MenuInput::Left),
        'd' => Some(MenuInput::Right),
        'z' => Some(MenuInput::Confirm),
        'x' => Some(MenuInput::Cancel),
        _ => None,
    }
}

/// Forward keys typed on stdin. A line may hold several keys.
async fn read_keys(sender: mpsc::Sender<MenuInput>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        for input in line.chars().filter_map(parse_key) {
            if sender.send(input).await.is_err() {
                return;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // pokemon-rpg [config.ron] [data-dir]
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => BattleConfig::load(Path::new(&path))?,
        None => BattleConfig::default(),
    };
    let dex = match args.next() {
        Some(dir) => Dex::load(Path::new(&dir))?,
        None => Dex::builtin()?,
    };
    let timing = config.timing.clone();
    let ctx = BattleContext::new(config);

    let area = MapArea::builtin()?;
    let mut rng = BattleRng::from_os_rng();

    let party = Party::new(vec![
        dex.create_pokemon("Charmander", 8)?,
        dex.create_pokemon("Pikachu", 7)?,
        dex.create_pokemon("Squirtle", 6)?,
    ])?;

    let mut steps = 1;
    while !area.check_for_encounter(&mut rng) {
        steps += 1;
    }
    let wild = area.random_wild_pokemon(&dex, &mut rng)?;
    println!(
        "Walked {} steps through the grass of {}. (w/a/s/d to move, z to confirm, x to cancel)",
        steps, area.name
    );
    let system = BattleSystem::new(ctx, party, wild, rng)?;

    let (sender, receiver) = mpsc::channel(32);
    tokio::spawn(read_keys(sender));

    let outcome = BattleRunner::new(system, TerminalPresenter, timing, receiver)
        .run()
        .await?;

    for pokemon in outcome.party.iter() {
        println!("{} Lv.{} {}/{}", pokemon.name(), pokemon.level, pokemon.hp, pokemon.max_hp);
    }
    Ok(())
}
