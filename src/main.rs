use anyhow::Result;

use std::io::{stdin, stdout, Stdin, Write};

use connectfour::agent::{Agent, KnowledgeAgent, MinimaxAgent, RandomAgent};
use connectfour::board::{Board, Player, Status};
use connectfour::knowledge::{KnowledgeStore, STORE_PATH};

mod display;

const AI_DEPTH: u32 = 6;
const TRAINING_GAMES: usize = 20_000;

enum Seat {
    Human,
    Computer(Box<dyn Agent>),
}

fn main() -> Result<()> {
    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    let mut seats = [
        choose_seat(&stdin, Player::One)?,
        choose_seat(&stdin, Player::Two)?,
    ];

    let mut board = Board::new();

    // game loop
    loop {
        display::draw(&board)?;

        match board.winner() {
            Status::InProgress => {}
            Status::Won(winner) => {
                println!("Player {} wins!", winner);
                break;
            }
            Status::Draw => {
                println!("Draw!");
                break;
            }
        }

        let seat = match board.to_move() {
            Player::One => &mut seats[0],
            Player::Two => &mut seats[1],
        };

        let next_move = match seat {
            Seat::Computer(agent) => {
                println!("AI is thinking...");
                stdout().flush()?;

                match agent.choose_move(&board) {
                    Some(column) => column,
                    // unreachable: a full board is caught as a draw above
                    None => break,
                }
            }
            Seat::Human => {
                print!("Move input (0 to quit) > ");
                stdout().flush()?;
                let mut input = String::new();
                stdin.read_line(&mut input)?;

                match input.trim().parse::<usize>() {
                    Ok(0) => {
                        println!("Thanks for playing!");
                        return Ok(());
                    }
                    Ok(column) => column - 1,
                    Err(_) => {
                        println!("Invalid number: {}", input.trim());
                        continue;
                    }
                }
            }
        };

        if let Err(err) = board.apply_move(next_move) {
            println!("{}", err);
            // try the move again
            continue;
        }
    }
    Ok(())
}

fn choose_seat(stdin: &Stdin, player: Player) -> Result<Seat> {
    loop {
        print!("Player {} - (h)uman, (a)i, (r)andom or (k)nowledge? ", player);
        stdout().flush()?;

        let mut buffer = String::new();
        stdin.read_line(&mut buffer)?;

        match buffer.to_lowercase().chars().next() {
            Some('h') => return Ok(Seat::Human),
            Some('a') => return Ok(Seat::Computer(Box::new(MinimaxAgent::new(AI_DEPTH)))),
            Some('r') => return Ok(Seat::Computer(Box::new(RandomAgent))),
            Some('k') => {
                let store = load_knowledge(stdin)?;
                return Ok(Seat::Computer(Box::new(KnowledgeAgent::new(store))));
            }
            _ => println!("Unknown answer given"),
        }
    }
}

fn load_knowledge(stdin: &Stdin) -> Result<KnowledgeStore> {
    match KnowledgeStore::load(STORE_PATH) {
        Ok(store) => return Ok(store),
        Err(err) => {
            let not_found = err
                .root_cause()
                .downcast_ref::<std::io::Error>()
                .map_or(false, |io_error| {
                    io_error.kind() == std::io::ErrorKind::NotFound
                });
            if !not_found {
                return Err(err);
            }
        }
    }

    loop {
        print!(
            "Knowledge store not found, train one now? ({} self-play games)\ny/n: ",
            TRAINING_GAMES
        );
        stdout().flush()?;

        let mut buffer = String::new();
        stdin.read_line(&mut buffer)?;

        match buffer.to_lowercase().chars().next() {
            Some('y') => {
                let mut store = KnowledgeStore::new();
                store.train(TRAINING_GAMES);
                store.save(STORE_PATH)?;
                println!("Trained on {} positions", store.len());
                return Ok(store);
            }
            Some('n') => {
                println!("Starting with an empty store, expect weak play");
                return Ok(KnowledgeStore::new());
            }
            _ => println!("Unknown answer given"),
        }
    }
}
