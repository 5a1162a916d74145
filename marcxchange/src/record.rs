//! Record model: leader, control fields, and data fields with subfields.
const TAG_SIZE: usize = 3;
const LEADER_SIZE: usize = 24;
const CODE_SIZE: usize = 1;
const DEFAULT_LEADER: &str = "                        ";
const DEFAULT_INDICATOR: &str = " ";

/// Verifies the provided string is composed of 'len' number of bytes.
fn check_byte_count(s: &str, len: usize) -> Result<(), String> {
    let byte_len = s.as_bytes().len();
    if byte_len != len {
        return Err(format!(
            "Invalid byte count for string s={s} wanted={len} found={byte_len}"
        ));
    }
    Ok(())
}

/// A control field, i.e. a field with character content and no subfields.
///
/// MarcXchange permits these, though danMARC2 records normally have none.
#[derive(Debug, Clone, PartialEq)]
pub struct Controlfield {
    tag: String,
    content: String,
}

impl Controlfield {
    /// Create a Controlfield with the provided tag and content.
    ///
    /// * `tag` - Must have the correct byte count.
    ///
    /// # Examples
    ///
    /// ```
    /// let control_field = marcxchange::Controlfield::new("008", "961226").unwrap();
    /// assert_eq!(control_field.tag(), "008");
    /// assert_eq!(control_field.content(), "961226");
    /// ```
    pub fn new(tag: impl Into<String>, content: impl Into<String>) -> Result<Self, String> {
        let tag = tag.into();
        check_byte_count(&tag, TAG_SIZE)?;
        Ok(Controlfield {
            tag,
            content: content.into(),
        })
    }

    /// Get the tag
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Get the content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Set the Controlfield content.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}

/// A single subfield code + value pair.
///
/// An absent value is represented as the empty string, never as a
/// missing subfield entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Subfield {
    code: String,
    content: String,
}

impl Subfield {
    /// Create a Subfield with the provided code and content.
    ///
    /// * `code` - Must have the correct byte count.
    ///
    /// # Examples
    ///
    /// ```
    /// use marcxchange::Subfield;
    /// let subfield = match Subfield::new("i", "Mørkets gerninger") {
    ///   Ok(sf) => sf,
    ///   Err(e) => panic!("Subfield::new() failed with: {}", e),
    /// };
    /// assert_eq!(subfield.content(), "Mørkets gerninger");
    /// ```
    ///
    /// ```should_panic
    /// use marcxchange::Subfield;
    /// Subfield::new("🦋", "Mørkets gerninger").unwrap();
    /// ```
    pub fn new(code: impl Into<String>, content: impl Into<String>) -> Result<Self, String> {
        let code = code.into();
        check_byte_count(&code, CODE_SIZE)?;
        Ok(Subfield {
            code,
            content: content.into(),
        })
    }
    /// Get the Subfield content.
    pub fn content(&self) -> &str {
        &self.content
    }
    /// Set the Subfield content.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
    /// Get the Subfield code.
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// A data field with tag, indicators, and subfields.
///
/// danMARC2 places every tag, "001" through "999", in data fields, so
/// only the byte count of the tag is enforced here.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    tag: String,
    ind1: Option<String>,
    ind2: Option<String>,
    subfields: Vec<Subfield>,
}

impl Field {
    /// Create a Field with the provided tag.
    ///
    /// * `tag` - Must have the correct byte count.
    ///
    /// # Examples
    ///
    /// ```
    /// use marcxchange::Field;
    ///
    /// let field = Field::new("001").unwrap();
    /// assert_eq!(field.tag(), "001");
    /// assert_eq!(field.ind1(), " ");
    /// assert_eq!(field.subfields().len(), 0);
    ///
    /// assert!(Field::new("53").is_err());
    /// ```
    pub fn new(tag: impl Into<String>) -> Result<Self, String> {
        let tag = tag.into();
        check_byte_count(&tag, TAG_SIZE)?;

        Ok(Field {
            tag,
            ind1: None,
            ind2: None,
            subfields: Vec::new(),
        })
    }
    /// Get the tag
    pub fn tag(&self) -> &str {
        &self.tag
    }
    /// Get the value of indicator-1, defaulting to a single space.
    pub fn ind1(&self) -> &str {
        self.ind1.as_deref().unwrap_or(DEFAULT_INDICATOR)
    }
    /// Get the value of indicator-2, defaulting to a single space.
    pub fn ind2(&self) -> &str {
        self.ind2.as_deref().unwrap_or(DEFAULT_INDICATOR)
    }
    /// Get the full list of subfields in occurrence order.
    pub fn subfields(&self) -> &Vec<Subfield> {
        &self.subfields
    }
    /// Get a mutable list of subfields.
    pub fn subfields_mut(&mut self) -> &mut Vec<Subfield> {
        &mut self.subfields
    }

    /// Set the indicator-1 value.
    ///
    /// * `ind` - Must have the correct byte count.
    pub fn set_ind1(&mut self, ind: impl Into<String>) -> Result<(), String> {
        let ind = ind.into();
        check_byte_count(&ind, CODE_SIZE)?;
        self.ind1 = Some(ind);
        Ok(())
    }

    /// Set the indicator-2 value.
    ///
    /// * `ind` - Must have the correct byte count.
    pub fn set_ind2(&mut self, ind: impl Into<String>) -> Result<(), String> {
        let ind = ind.into();
        check_byte_count(&ind, CODE_SIZE)?;
        self.ind2 = Some(ind);
        Ok(())
    }

    /// Get a list of subfields with the provided code, in occurrence order.
    pub fn get_subfields(&self, code: &str) -> Vec<&Subfield> {
        self.subfields.iter().filter(|f| f.code() == code).collect()
    }

    /// Get the first occurrence of the subfield with the provided code,
    /// if one is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use marcxchange::Field;
    ///
    /// let mut field = Field::new("530").unwrap();
    /// assert!(field.first_subfield("i").is_none());
    ///
    /// field.add_subfield("i", "First one").unwrap();
    /// field.add_subfield("i", "Second one").unwrap();
    ///
    /// assert_eq!(field.first_subfield("i").unwrap().content(), "First one");
    /// ```
    pub fn first_subfield(&self, code: &str) -> Option<&Subfield> {
        self.subfields.iter().find(|f| f.code() == code)
    }

    /// Get the content of the first occurrence of the subfield with the
    /// provided code, if one is present.
    pub fn first_value(&self, code: &str) -> Option<&str> {
        self.first_subfield(code).map(|sf| sf.content())
    }

    /// Get the content of every subfield with the provided code, in
    /// occurrence order.
    ///
    /// # Examples
    ///
    /// ```
    /// use marcxchange::Field;
    ///
    /// let mut field = Field::new("530").unwrap();
    /// field.add_subfield("d", "1").unwrap();
    /// field.add_subfield("x", "other").unwrap();
    /// field.add_subfield("d", "2").unwrap();
    ///
    /// assert_eq!(field.get_values("d"), vec!["1", "2"]);
    /// ```
    pub fn get_values(&self, code: &str) -> Vec<&str> {
        self.subfields
            .iter()
            .filter(|f| f.code() == code)
            .map(|f| f.content())
            .collect()
    }

    /// True if a subfield with the provided code is present, regardless
    /// of its content.
    pub fn has_subfield(&self, code: &str) -> bool {
        self.subfields.iter().any(|f| f.code() == code)
    }

    /// Get a mutable list of subfields with the provided code.
    pub fn get_subfields_mut(&mut self, code: &str) -> Vec<&mut Subfield> {
        self.subfields
            .iter_mut()
            .filter(|f| f.code() == code)
            .collect()
    }

    /// Adds a new Subfield to this field using the provided code and content.
    ///
    /// * `code` - Must have the correct byte count.
    pub fn add_subfield(
        &mut self,
        code: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), String> {
        self.subfields.push(Subfield::new(code, content)?);
        Ok(())
    }

    /// Remove all subfields with the specified code and return the
    /// count of removed subfields.
    pub fn remove_subfields(&mut self, code: &str) -> usize {
        let mut removed = 0;

        while let Some(index) = self.subfields.iter().position(|s| s.code() == code) {
            self.subfields.remove(index);
            removed += 1;
        }

        removed
    }
}

/// A MarcXchange record with leader, control fields, and data fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    leader: String,
    control_fields: Vec<Controlfield>,
    fields: Vec<Field>,
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl Record {
    /// Create a new Record with a default leader and no content.
    pub fn new() -> Self {
        Record {
            leader: DEFAULT_LEADER.to_string(),
            control_fields: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Get the leader as a string.
    pub fn leader(&self) -> &str {
        &self.leader
    }

    /// Apply a leader value.
    ///
    /// Returns Err if the value is not composed of the correct number
    /// of bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use marcxchange::Record;
    /// let mut record = Record::default();
    /// assert!(record.set_leader("too short").is_err());
    /// assert!(record.set_leader("just right              ").is_ok());
    /// ```
    pub fn set_leader(&mut self, leader: impl Into<String>) -> Result<(), String> {
        let leader = leader.into();
        check_byte_count(&leader, LEADER_SIZE)?;
        self.leader = leader;
        Ok(())
    }

    /// Get the full list of control fields.
    pub fn control_fields(&self) -> &Vec<Controlfield> {
        &self.control_fields
    }
    /// Get the full list of control fields, mutable.
    pub fn control_fields_mut(&mut self) -> &mut Vec<Controlfield> {
        &mut self.control_fields
    }
    /// Get the full list of fields in document order.
    pub fn fields(&self) -> &Vec<Field> {
        &self.fields
    }
    /// Get the full list of fields, mutable.
    pub fn fields_mut(&mut self) -> &mut Vec<Field> {
        &mut self.fields
    }

    /// Return a list of control fields with the provided tag.
    pub fn get_control_fields(&self, tag: &str) -> Vec<&Controlfield> {
        self.control_fields
            .iter()
            .filter(|f| f.tag() == tag)
            .collect()
    }

    /// Return a list of fields with the provided tag, in document order.
    pub fn get_fields(&self, tag: &str) -> Vec<&Field> {
        self.fields.iter().filter(|f| f.tag() == tag).collect()
    }

    /// Return a mutable list of fields with the provided tag.
    pub fn get_fields_mut(&mut self, tag: &str) -> Vec<&mut Field> {
        self.fields.iter_mut().filter(|f| f.tag() == tag).collect()
    }

    /// Add a new control field with the provided tag and content.
    pub fn add_control_field(&mut self, tag: &str, content: &str) -> Result<(), String> {
        self.control_fields.push(Controlfield::new(tag, content)?);
        Ok(())
    }

    /// Insert a [`Field`] in tag order, after any fields carrying the
    /// same tag, and return its position.
    pub fn insert_field(&mut self, field: Field) -> usize {
        if let Some(idx) = self.fields().iter().position(|f| f.tag() > field.tag()) {
            self.fields_mut().insert(idx, field);
            idx
        } else {
            self.fields_mut().push(field);
            self.fields().len() - 1
        }
    }

    /// Create a new Field with the provided tag, insert it into the
    /// record in tag order, then return a mut ref to the new field.
    ///
    /// # Examples
    ///
    /// ```
    /// use marcxchange::Record;
    /// let mut record = Record::default();
    ///
    /// let field = record.add_data_field("530").unwrap();
    /// field.add_subfield("i", "Najaden-serien").unwrap();
    ///
    /// record.add_data_field("001").unwrap();
    /// assert!(record.add_data_field("1234").is_err());
    ///
    /// assert_eq!(record.fields()[0].tag(), "001");
    /// assert_eq!(record.fields()[1].tag(), "530");
    /// ```
    pub fn add_data_field(&mut self, tag: impl Into<String>) -> Result<&mut Field, String> {
        let pos = self.insert_field(Field::new(tag)?);
        Ok(self.fields_mut().get_mut(pos).unwrap())
    }

    /// Returns a list of values for the specified tag and subfield,
    /// spanning repeated fields in document order.
    ///
    /// # Examples
    ///
    /// ```
    /// use marcxchange::Record;
    /// let mut record = Record::default();
    /// let field = record.add_data_field("530").unwrap();
    /// field.add_subfield("x", "foo").unwrap();
    /// field.add_subfield("x", "bar").unwrap();
    ///
    /// let field = record.add_data_field("530").unwrap();
    /// field.add_subfield("x", "baz").unwrap();
    ///
    /// let values = record.get_values("530", "x");
    ///
    /// assert_eq!(values.len(), 3);
    /// assert_eq!(values[1], "bar");
    /// ```
    pub fn get_values(&self, tag: &str, sfcode: &str) -> Vec<&str> {
        let mut vec = Vec::new();
        for field in self.get_fields(tag) {
            for sf in field.get_subfields(sfcode) {
                vec.push(sf.content());
            }
        }
        vec
    }

    /// Returns the first value for the specified tag and subfield, if
    /// any occurrence exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use marcxchange::Record;
    /// let mut record = Record::default();
    /// assert!(record.first_value("001", "a").is_none());
    ///
    /// let field = record.add_data_field("001").unwrap();
    /// field.add_subfield("a", "51488465").unwrap();
    ///
    /// assert_eq!(record.first_value("001", "a"), Some("51488465"));
    /// ```
    pub fn first_value(&self, tag: &str, sfcode: &str) -> Option<&str> {
        self.get_fields(tag)
            .first()
            .and_then(|f| f.first_value(sfcode))
    }

    /// Remove all occurrences of fields with the provided tag.
    pub fn remove_fields(&mut self, tag: &str) {
        while let Some(pos) = self.fields.iter().position(|f| f.tag() == tag) {
            self.fields.remove(pos);
        }
    }
}
