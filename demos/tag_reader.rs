//! Prints the normalized metadata of an audio file.

use tagweave::config::ParseOptions;
use tagweave::rating_to_stars;

use std::path::Path;

fn main() {
	let path_str = std::env::args().nth(1).expect("ERROR: No path specified!");
	let path = Path::new(&path_str);

	if !path.is_file() {
		panic!("ERROR: Path is not a file!");
	}

	let options = ParseOptions::new().merge_tag_headers(true);
	let metadata = tagweave::parse_file(path, &options).expect("ERROR: Failed to read file!");

	let common = &metadata.common;
	let rating = common.ratings().first().map(|rating| rating.rating);

	println!("--- Tag Information ---");
	println!("Title: {}", common.title().unwrap_or("None"));
	println!("Artist: {}", common.artist().unwrap_or("None"));
	println!("Album: {}", common.album().unwrap_or("None"));
	println!("Genre: {}", common.genre().join("; "));
	println!("Track: {:?}/{:?}", common.track().no, common.track().of);
	println!("Rating: {} stars", rating_to_stars(rating));

	let format = &metadata.format;

	let duration = format.duration.unwrap_or_default();
	let seconds = duration.as_secs() % 60;

	let duration_display = format!("{:02}:{:02}", (duration.as_secs() - seconds) / 60, seconds);

	let tag_types = format
		.tag_types
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>();

	println!("--- Audio Properties ---");
	println!("Container: {}", format.container.as_deref().unwrap_or("Unknown"));
	println!("Codec: {}", format.codec.as_deref().unwrap_or("Unknown"));
	println!("Tag types: {}", tag_types.join(", "));
	println!("Bitrate: {}", format.bitrate.unwrap_or(0));
	println!("Sample Rate: {}", format.sample_rate.unwrap_or(0));
	println!("Bit depth: {}", format.bits_per_sample.unwrap_or(0));
	println!("Channels: {}", format.channels.unwrap_or(0));
	println!("Duration: {}", duration_display);
}
