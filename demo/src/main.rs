//! Runs a disposal allocator over a fresh pool and prints what it handed out.
use argh::FromArgs;
use disposal_allocator::simulation::{self, ReadOrder};
use disposal_allocator::{DisposalAllocator, InitError, RandomSource};
use log::info;
use std::process::ExitCode;
use tiny_rng::{Rand, Rng};

/// Allocate every slot of a pool in random order and report the scan distances.
#[derive(FromArgs)]
struct Args {
    /// number of slots in the pool
    #[argh(option, default = "10")]
    size: u64,

    /// number of allocations to make (defaults to the pool size)
    #[argh(option)]
    rounds: Option<u64>,

    /// seed for the random generator (seeded from the clock if omitted)
    #[argh(option)]
    seed: Option<u64>,

    /// list the read counts from longest to shortest
    #[argh(switch)]
    sort_reads: bool,
}

fn run_with<R: RandomSource>(args: &Args, source: R) -> Result<(), InitError> {
    let mut pool = DisposalAllocator::with_source(args.size, source)?;
    let report = simulation::run(&mut pool, args.rounds.unwrap_or(args.size));

    let order = if args.sort_reads {
        ReadOrder::Descending
    } else {
        ReadOrder::CallOrder
    };
    println!("{}", report.display(order));
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args: Args = argh::from_env();

    let result = match args.seed {
        Some(seed) => {
            info!("seeding the generator with {seed}");
            run_with(&args, Rng::from_seed(seed))
        }
        None => run_with(&args, disposal_allocator::random::time_seeded_rng()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
