
use std::{collections::BTreeMap, env, fs, path::PathBuf};

use serde::Deserialize;

/// A flag may be written either as a JSON number or as a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum FlagValue {
    Number(usize),
    Text(String),
}

impl FlagValue {
    fn as_usize(&self, key: &str) -> usize {
        match self {
            FlagValue::Number(n) => *n,
            FlagValue::Text(s) => s
                .trim()
                .parse()
                .unwrap_or_else(|_| panic!("Flag {} is not an unsigned integer: {:?}", key, s)),
        }
    }
}

fn main(){

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let profile = env::var("PROFILE").unwrap();
    let flags_str = fs::read_to_string(PathBuf::from(manifest_dir.clone()).join("../../flags.json")).unwrap();
    let flagmap: BTreeMap<String,BTreeMap<String,FlagValue>> = serde_json::from_str(&flags_str).unwrap();
    let flags = match flagmap.get(profile.as_str()){
        Some(value) => value,
        None => panic!("Unknown build profile: {}.", profile)
    };
    make_flags(flags);
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../../flags.json");
}


fn make_flags(flagmap: &BTreeMap<String,FlagValue>){
    let mut s: String = String::from("");
    for (key, value) in flagmap {
        s += format!("/// `{}` from flags.json\npub const {}: usize = {};\n",key,key,value.as_usize(key)).as_str();
    }
    let out_dir = env::var("OUT_DIR").unwrap();
    let path = PathBuf::from(out_dir).join("build_flags.rs");
    fs::write(path,s).unwrap();
}
