/*!
# BOM Fixtures

Generates byte-order-mark test fixtures from one canonical UTF-8 text file.
The source is decoded once and re-emitted as five files, each holding the
BOM of its encoding followed by the text in that encoding:

```text
text_UTF-8.txt  ──►  text_UTF-8-BOM.txt     EF BB BF     + UTF-8
                ├─►  text_UTF-16BE-BOM.txt  FE FF        + UTF-16BE
                ├─►  text_UTF-16LE-BOM.txt  FF FE        + UTF-16LE
                ├─►  text_UTF-32BE-BOM.txt  00 00 FE FF  + UTF-32BE
                └─►  text_UTF-32LE-BOM.txt  FF FE 00 00  + UTF-32LE
```

## Architecture

```text
├── Core        - FixtureError, strict UTF-8 reader, fixture writer
├── Encoding    - descriptor table, BOMs, encode/decode, BOM detection
├── Config      - source/output paths, failure policy, TOML loading
├── Generator   - the fixture generation run
├── Verify      - re-reads fixtures and checks them against the source
└── CLI common  - logging setup and shared arguments
```

## Usage

### CLI
```bash
# text_UTF-8.txt in the working directory -> five fixtures beside it
bom-fixtures

# explicit source, separate output directory, check the results
bom-fixtures testdata/text_UTF-8.txt --output-dir target/fixtures --verify
```

### Library
```no_run
use bom_fixtures::generate;

let report = generate("testdata/text_UTF-8.txt")?;
for fixture in &report.fixtures {
    println!("{}: {} bytes", fixture.path.display(), fixture.bytes_written);
}
# Ok::<(), bom_fixtures::FixtureError>(())
```
*/

pub mod cli_common;
pub mod config;
pub mod core;
pub mod encoding;
pub mod generator;
pub mod verify;

pub use config::{FailurePolicy, GeneratorConfig, DEFAULT_SOURCE};
pub use crate::core::{FixtureError, FixtureResult};
pub use encoding::{detect_bom, fixture_file_name, Codec, EncodingDescriptor, DESCRIPTORS};
pub use generator::{generate, FixtureGenerator, GenerationReport, WrittenFixture};
pub use verify::{verify_fixtures, VerificationReport};
