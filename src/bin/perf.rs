use arbitrary::Arbitrary;
use log::info;
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use structopt::StructOpt;

use std::time;

use bbst::RBTree;

/// Command line options.
#[derive(Clone, StructOpt)]
pub struct Opt {
    #[structopt(long = "seed")]
    seed: Option<u64>,

    #[structopt(long = "log-level", default_value = "info")]
    log_level: LevelFilter,

    #[structopt(long = "loads", default_value = "1000000")] // default 1M
    loads: usize,

    #[structopt(long = "increases", default_value = "1000000")] // default 1M
    increases: usize,

    #[structopt(long = "decreases", default_value = "1000000")] // default 1M
    decreases: usize,

    #[structopt(long = "queries", default_value = "1000000")] // default 1M
    queries: usize,
}

fn main() {
    let opts = Opt::from_args();
    TermLogger::init(
        opts.log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .ok();

    let seed = opts.seed.unwrap_or_else(random);
    let mut rng = SmallRng::seed_from_u64(seed);
    info!("perf seed {}", seed);

    // initial load, every other key so that increases also insert.
    let start = time::Instant::now();
    let entries = (0..opts.loads).map(|i| ((i as i64) * 2, 1 + (i as i64 % 10)));
    let mut index: RBTree<i64, i64> = RBTree::from_sorted(entries).unwrap();
    info!("loaded {} items in {:?}", index.len(), start.elapsed());

    let span = (opts.loads as i64).max(1) * 2;
    let total = opts.increases + opts.decreases + opts.queries;
    let start = time::Instant::now();
    for _i in 0..total {
        let op = rng.gen::<usize>() % total;
        let key = rng.gen_range(0..span);
        if op < opts.increases {
            index.increase(key, rng.gen_range(1..10));
            continue;
        } else if op < (opts.increases + opts.decreases) {
            index.decrease(&key, rng.gen_range(1..10));
            continue;
        }

        let bytes = rng.gen::<[u8; 16]>();
        let mut uns = arbitrary::Unstructured::new(&bytes);
        let query: Query = uns.arbitrary().unwrap();
        match query {
            Query::Count => {
                index.count(&key);
            }
            Query::RangeSum(width) => {
                index.range_sum::<i128>(&key, &(key + i64::from(width)));
            }
            Query::Successor => {
                index.successor(&key);
            }
            Query::Predecessor => {
                index.predecessor(&key);
            }
        }
    }
    info!("{} operations took {:?}", total, start.elapsed());

    let start = time::Instant::now();
    let (ok, depth) = index.verify();
    info!(
        "verify:{} depth:{} len:{} took {:?}",
        ok,
        depth,
        index.len(),
        start.elapsed()
    );
}

#[derive(Clone, Debug, Arbitrary, Eq, PartialEq)]
enum Query {
    Count,
    RangeSum(u8),
    Successor,
    Predecessor,
}
