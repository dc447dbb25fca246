//! Shared helpers for tests.

use std::fs;
use tempfile::TempDir;

/// A minimal pom declaring the JavaFX Maven plugin with an empty
/// configuration.
pub fn sample_pom() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.example</groupId>
  <artifactId>demo-app</artifactId>
  <version>1.0.0</version>
  <build>
    <plugins>
      <plugin>
        <groupId>org.openjfx</groupId>
        <artifactId>javafx-maven-plugin</artifactId>
        <version>0.0.8</version>
        <configuration>
          <mainClass>com.example.demo.App</mainClass>
        </configuration>
      </plugin>
    </plugins>
  </build>
</project>
"#
}

/// A pom without the JavaFX Maven plugin.
pub fn pom_without_javafx_plugin() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.example</groupId>
  <artifactId>plain-app</artifactId>
  <version>1.0.0</version>
</project>
"#
}

/// Create a temporary Maven project containing the sample pom.
pub fn create_test_project() -> TempDir {
    create_test_project_with(sample_pom())
}

/// Create a temporary Maven project with the given pom contents.
pub fn create_test_project_with(pom: &str) -> TempDir {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    fs::write(temp_dir.path().join("pom.xml"), pom).expect("failed to write pom.xml");
    temp_dir
}
