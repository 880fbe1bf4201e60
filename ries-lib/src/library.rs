use std::collections::{BTreeMap, HashMap};
use std::io::Read;

use ries_data::{IsotopeRecord, NuclideLibraryRecord, StateRecord};

use crate::element::Element;
use crate::error::{Result, RiesError};
use crate::isotope::Isotope;
use crate::nonresonant::AttenuationTable;
use crate::state::{Parity, State};

/// Nuclear data records decoded from postcard bytes, with lookups that
/// return validated domain types.
#[derive(Debug)]
pub struct NuclideLibrary {
    records: NuclideLibraryRecord,
    isotope_index: HashMap<String, usize>,
    element_index: HashMap<String, usize>,
    attenuation_index: HashMap<String, usize>,
}

impl NuclideLibrary {
    pub fn from_records(records: NuclideLibraryRecord) -> Self {
        let isotope_index = records
            .isotopes
            .iter()
            .enumerate()
            .map(|(i, iso)| (iso.id.clone(), i))
            .collect();
        let mut element_index = HashMap::new();
        for (i, elem) in records.elements.iter().enumerate() {
            element_index.insert(elem.symbol.clone(), i);
            element_index.insert(elem.symbol.to_lowercase(), i);
        }
        let mut attenuation_index = HashMap::new();
        for (i, table) in records.attenuation.iter().enumerate() {
            attenuation_index.insert(table.symbol.clone(), i);
            attenuation_index.insert(table.symbol.to_lowercase(), i);
        }
        Self {
            records,
            isotope_index,
            element_index,
            attenuation_index,
        }
    }

    pub fn from_postcard(bytes: &[u8]) -> Result<Self> {
        let records: NuclideLibraryRecord = postcard::from_bytes(bytes)
            .map_err(|e| RiesError::DataError(format!("failed to deserialize records: {e}")))?;
        Ok(Self::from_records(records))
    }

    /// Decode a zstd-compressed postcard library.
    pub fn from_compressed(bytes: &[u8]) -> Result<Self> {
        let mut decoder = ruzstd::decoding::StreamingDecoder::new(bytes)
            .map_err(|e| RiesError::DataError(format!("failed to create zstd decoder: {e}")))?;
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .map_err(|e| RiesError::DataError(format!("failed to decompress records: {e}")))?;
        Self::from_postcard(&decompressed)
    }

    /// Access the raw records.
    pub fn raw(&self) -> &NuclideLibraryRecord {
        &self.records
    }

    pub fn isotope(&self, id: &str) -> Result<Isotope> {
        let record = self
            .isotope_index
            .get(id)
            .map(|&i| &self.records.isotopes[i])
            .ok_or_else(|| RiesError::UnknownIsotope(id.to_string()))?;
        isotope_from_record(record)
    }

    /// Element by symbol (case-insensitive), with every isotope of the
    /// same proton number in the library.
    pub fn element(&self, symbol: &str) -> Result<Element> {
        let record = self
            .element_index
            .get(symbol)
            .or_else(|| self.element_index.get(&symbol.to_lowercase()))
            .map(|&i| &self.records.elements[i])
            .ok_or_else(|| RiesError::UnknownElement(symbol.to_string()))?;

        let isotopes = self
            .records
            .isotopes
            .iter()
            .filter(|iso| iso.proton_number == record.proton_number)
            .map(|iso| Ok((iso.mass_number, isotope_from_record(iso)?)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        let abundances = record
            .abundances
            .iter()
            .map(|a| (a.mass_number, a.fraction))
            .collect();

        Element::new(
            record.proton_number,
            record.symbol.clone(),
            isotopes,
            abundances,
            record.density,
        )
    }

    /// Nonresonant attenuation of an element, per atom of the element.
    pub fn attenuation(&self, symbol: &str) -> Result<AttenuationTable> {
        let record = self
            .attenuation_index
            .get(symbol)
            .or_else(|| self.attenuation_index.get(&symbol.to_lowercase()))
            .map(|&i| &self.records.attenuation[i])
            .ok_or_else(|| RiesError::UnknownElement(symbol.to_string()))?;
        let element = self.element(symbol)?;
        AttenuationTable::from_record(record, element.amu())
    }
}

fn state_from_record(record: &StateRecord) -> Result<State> {
    let parity = Parity::from_value(record.parity)?;
    if record.partial_widths.is_empty() && record.excitation_energy == 0.0 {
        return Ok(State::ground(record.id.clone(), record.two_j, parity));
    }
    let widths = record
        .partial_widths
        .iter()
        .map(|w| (w.to.clone(), w.width))
        .collect();
    State::excited(
        record.id.clone(),
        record.two_j,
        parity,
        record.excitation_energy,
        widths,
    )
}

fn isotope_from_record(record: &IsotopeRecord) -> Result<Isotope> {
    let ground = state_from_record(&record.ground_state)?;
    let excited = record
        .excited_states
        .iter()
        .map(|s| Ok((s.id.clone(), state_from_record(s)?)))
        .collect::<Result<BTreeMap<_, _>>>()?;
    Isotope::new(record.id.clone(), record.amu, ground, excited)
}
