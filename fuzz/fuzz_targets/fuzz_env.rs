#![no_main]

use libfuzzer_sys::fuzz_target;
use libopts::EnvTable;

fuzz_target!(|lines: Vec<String>| {
    // Should never panic regardless of how malformed the entries are:
    // missing '=', empty names, repeated names, embedded NULs, etc.
    let env = EnvTable::from_pairs(&lines);

    for line in &lines {
        if let Some((name, _)) = line.split_once('=') {
            let _ = env.get(name);
        }
    }
});
