use roveac::graph::Graph;
use roveac::search::{descend, DescentConfig, Verdict};
use roveac::witness::is_witness;

fn main() {
    let mut cfg = DescentConfig {
        report: true,
        ..DescentConfig::default()
    };
    let mut files: Vec<String> = Vec::new();
    let mut s: Option<usize> = None;
    let mut t: Option<usize> = None;
    let mut check_only = false;

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--case" => {
                let sv = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                let tv = args.get(i + 2).unwrap_or_else(|| usage_and_exit(2));
                s = Some(sv.parse().unwrap_or_else(|_| usage_and_exit(2)));
                t = Some(tv.parse().unwrap_or_else(|_| usage_and_exit(2)));
                i += 3;
            }
            "--method" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                cfg.method = v.clone();
                i += 2;
            }
            "--early-stop" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                cfg.early_stopping = Some(v.parse().unwrap_or_else(|_| usage_and_exit(2)));
                i += 2;
            }
            "--floor" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                cfg.floor_order = v.parse().unwrap_or_else(|_| usage_and_exit(2));
                i += 2;
            }
            "--parallel" => {
                cfg.parallel = true;
                i += 1;
            }
            "--check" => {
                check_only = true;
                i += 1;
            }
            "--help" | "-h" => usage_and_exit(0),
            flag if flag.starts_with("--") => usage_and_exit(2),
            file => {
                files.push(file.to_string());
                i += 1;
            }
        }
    }

    let (Some(s), Some(t)) = (s, t) else {
        usage_and_exit(2);
    };
    if files.is_empty() {
        usage_and_exit(2);
    }

    let mut start = Vec::with_capacity(files.len());
    for file in &files {
        match Graph::load_from_file(file) {
            Ok(g) => start.push(g),
            Err(e) => {
                eprintln!("{file}: {e}");
                std::process::exit(1);
            }
        }
    }

    if check_only {
        let mut ok = true;
        for (file, g) in files.iter().zip(&start) {
            if is_witness(g, s, t) {
                println!("{file}: valid R({s},{t}) witness on {} vertices", g.order());
            } else {
                println!("{file}: NOT a R({s},{t}) witness");
                ok = false;
            }
        }
        std::process::exit(i32::from(!ok));
    }

    println!("--------------------------------------------------");
    println!(
        "Descent: R({s},{t}) from {} witness graph(s) on n={}",
        start.len(),
        start[0].order()
    );
    println!(
        "method={} early_stop={:?} floor={} parallel={}",
        cfg.method, cfg.early_stopping, cfg.floor_order, cfg.parallel
    );
    println!("--------------------------------------------------");

    match descend(&start, s, t, &cfg) {
        Ok(report) => match report.verdict {
            Verdict::NoWitnessAtOrder(order) => {
                println!("No witness survives at n={order}: the supplied family generates no R({s},{t},{order}) witness.");
            }
            Verdict::WitnessesDownToFloor => {
                println!("Witnesses survive down to n={}.", cfg.floor_order);
            }
            Verdict::InvalidStart => {
                eprintln!("Error: a starting graph is not itself an R({s},{t}) witness.");
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn usage_and_exit(code: i32) -> ! {
    eprintln!(
        "Usage:\n  roveac --case S T [options] MATRIX_FILE...\n  roveac --case S T --check MATRIX_FILE...\n\nOptions:\n  --case S T        Forbidden clique size S and independent-set size T\n  --method NAME     Hashing method: triangle (default), sub_3, vf2pp_iter\n  --early-stop N    Stop an indexing pass once N classes exist\n  --floor N         Stop descending at order N (default: 1)\n  --parallel        Index candidates on the rayon thread pool\n  --check           Only validate the input graphs as witnesses\n\nInput files are square 0/1 adjacency matrices, one row per line.\n"
    );
    std::process::exit(code)
}
